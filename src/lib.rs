//! Searchable select reconciliation for server re-rendered pages
//!
//! A combo box carries two copies of the same select: the authoritative one
//! the server re-renders and the live one the enhancement widget owns. This
//! crate keeps the live copy in line without throwing away interaction state
//! unless the option set really changed, and routes remote option search
//! through a correlated request/reply bridge to the host process.
pub mod bridge;
pub mod config;
pub mod controller;
pub mod diff_engine;
pub mod dom;
pub mod errors;
pub mod html_generator;
pub mod patcher;
pub mod snapshot;
pub mod types;
pub mod widget;

pub use bridge::{HostChannel, HostReply, HostRequest, LoadCallback, PendingQuery, RemoteBridge};
pub use config::{ComboBoxConfig, RemoteRoute, SeedMode, register_global_options};
pub use controller::{ComboBox, ReconcileOutcome};
pub use diff_engine::{DiffEngine, seed_values};
pub use dom::{ComboBoxRoot, OptionElement, SelectElement};
pub use errors::ComboBoxError;
pub use patcher::SelectionPatcher;
pub use snapshot::SnapshotExtractor;
pub use types::{
    CorrelationId, InstanceHandle, LoadedOption, OptionRecord, ReconciliationDecision,
    SelectSnapshot, SnapshotSource,
};
pub use widget::{EnhancementSettings, Enhancer, WidgetAdapter, WidgetInstance};
