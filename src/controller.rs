//! Mount / updated / destroy orchestration for one combo box
//!
//! On every server re-render the controller seeds values according to the
//! mode chosen at mount, snapshots both selects, and then either does
//! nothing, patches selection flags in place, or rebuilds the enhancement
//! instance. Remote search runs through the bridge independently.
use crate::bridge::{HostChannel, HostReply, LoadCallback, RemoteBridge};
use crate::config::{ComboBoxConfig, SeedMode};
use crate::diff_engine::{DiffEngine, seed_values};
use crate::dom::ComboBoxRoot;
use crate::errors::ComboBoxError;
use crate::patcher::SelectionPatcher;
use crate::snapshot::SnapshotExtractor;
use crate::types::{CorrelationId, ReconciliationDecision};
use crate::widget::{Enhancer, WidgetAdapter, WidgetInstance};
use log::debug;

/// What one `updated` pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub decision: ReconciliationDecision,
    /// Selection flags changed by a selective patch.
    pub patched: usize,
}

pub struct ComboBox<E: Enhancer, H: HostChannel> {
    root_id: String,
    config: ComboBoxConfig,
    seed_mode: SeedMode,
    widget: WidgetAdapter<E>,
    bridge: RemoteBridge<H>,
    mounted: bool,
}

impl<E: Enhancer, H: HostChannel> ComboBox<E, H> {
    /// Parses the dataset, enhances the live select and reveals the wrapper.
    /// Nothing is constructed when the configuration is invalid.
    pub fn mount(root: &mut ComboBoxRoot, enhancer: E, host: H) -> Result<Self, ComboBoxError> {
        let config = ComboBoxConfig::from_dataset(&root.dataset)?;
        let live = root
            .live
            .as_ref()
            .ok_or_else(|| ComboBoxError::missing(format!("live select under '{}'", root.id)))?;

        let mut widget = WidgetAdapter::new(enhancer);
        widget.construct(live, &config.enhancement_settings())?;

        let seed_mode = config.seed_mode();
        let bridge = RemoteBridge::new(host, config.remote_route());
        root.reveal();
        debug!("combo box: mounted '{}' in {:?} mode", root.id, seed_mode);

        Ok(ComboBox {
            root_id: root.id.clone(),
            config,
            seed_mode,
            widget,
            bridge,
            mounted: true,
        })
    }

    /// Reconciles after a server re-render. `None` when either select is
    /// missing or the combo box was destroyed.
    pub fn updated(
        &mut self,
        root: &mut ComboBoxRoot,
    ) -> Result<Option<ReconcileOutcome>, ComboBoxError> {
        if !self.mounted {
            debug!("combo box: '{}' updated after destroy, skipping", self.root_id);
            return Ok(None);
        }

        let config = ComboBoxConfig::from_dataset(&root.dataset)?;
        let Some((authoritative, live)) = root.selects_mut() else {
            debug!("combo box: '{}' is missing a select, skipping", self.root_id);
            return Ok(None);
        };

        seed_values(self.seed_mode, authoritative, live);
        let (authoritative_snapshot, live_snapshot) =
            SnapshotExtractor::extract(Some(&*authoritative), Some(&*live));
        let engine = DiffEngine::new(&authoritative_snapshot, &live_snapshot);
        let decision = engine.reconcile();
        debug!(
            "combo box: '{}' reconciled as {}",
            self.root_id,
            decision.to_string()
        );

        let settings = config.enhancement_settings();
        let mut patched = 0;
        match decision {
            ReconciliationDecision::NoOp => {}
            ReconciliationDecision::SelectivePatch => {
                debug!(
                    "combo box: '{}' selection differs at {:?}",
                    self.root_id,
                    engine.selection_changes()
                );
                patched = SelectionPatcher::apply_selection(live, &authoritative_snapshot);
            }
            ReconciliationDecision::FullReinit => {
                self.bridge.abandon_all();
                self.widget.rebuild(authoritative, live, &settings)?;
            }
        }
        if !self.widget.is_attached() {
            self.widget.construct(live, &settings)?;
        }

        self.bridge.retarget(config.remote_route());
        self.config = config;
        Ok(Some(ReconcileOutcome { decision, patched }))
    }

    /// Starts a remote load for `query`; `resolve` runs when the reply lands.
    pub fn search(
        &mut self,
        query: &str,
        resolve: LoadCallback,
    ) -> Result<CorrelationId, ComboBoxError> {
        if !self.mounted {
            return Err(ComboBoxError::Destroyed {
                root_id: self.root_id.clone(),
            });
        }
        self.bridge.issue(query, resolve)
    }

    pub fn receive_reply(&mut self, correlation_id: CorrelationId, reply: HostReply) -> bool {
        self.bridge.on_reply(correlation_id, reply)
    }

    pub fn receive_reply_json(
        &mut self,
        correlation_id: CorrelationId,
        raw: &str,
    ) -> Result<bool, ComboBoxError> {
        self.bridge.on_reply_json(correlation_id, raw)
    }

    /// Tears down the instance and abandons pending queries. Idempotent;
    /// also runs on drop.
    pub fn destroy(&mut self) {
        if !self.mounted {
            return;
        }
        self.widget.destroy();
        let abandoned = self.bridge.abandon_all();
        self.mounted = false;
        debug!(
            "combo box: destroyed '{}' ({} query(ies) abandoned)",
            self.root_id, abandoned
        );
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn seed_mode(&self) -> SeedMode {
        self.seed_mode
    }

    pub fn config(&self) -> &ComboBoxConfig {
        &self.config
    }

    pub fn instance(&self) -> Option<&WidgetInstance> {
        self.widget.instance()
    }

    pub fn enhancer(&self) -> &E {
        self.widget.enhancer()
    }

    pub fn bridge(&self) -> &RemoteBridge<H> {
        &self.bridge
    }
}

impl<E: Enhancer, H: HostChannel> Drop for ComboBox<E, H> {
    fn drop(&mut self) {
        self.destroy();
    }
}
