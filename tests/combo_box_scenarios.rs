//! End-to-end scenarios: diff + patch, rebuild through the controller, and a
//! remote search round trip.

use pretty_assertions::assert_eq;
use rust_combo_box::{
    ComboBox, ComboBoxError, ComboBoxRoot, CorrelationId, DiffEngine, EnhancementSettings,
    Enhancer, HostChannel, HostReply, HostRequest, InstanceHandle, LoadedOption, OptionElement,
    ReconciliationDecision, SelectElement, SelectionPatcher, SnapshotExtractor, SnapshotSource,
    register_global_options,
};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct ScriptedEnhancer {
    next: u64,
    attached: Vec<InstanceHandle>,
    settings: Vec<EnhancementSettings>,
}

impl Enhancer for ScriptedEnhancer {
    fn construct(
        &mut self,
        _element: &SelectElement,
        settings: &EnhancementSettings,
    ) -> Result<InstanceHandle, ComboBoxError> {
        self.next += 1;
        self.attached.push(InstanceHandle(self.next));
        self.settings.push(settings.clone());
        Ok(InstanceHandle(self.next))
    }

    fn destroy(&mut self, handle: InstanceHandle) {
        self.attached.retain(|h| *h != handle);
    }
}

/// Host whose outbox stays readable after the controller takes ownership.
#[derive(Clone, Default)]
struct SharedHost {
    outbox: Rc<RefCell<Vec<HostRequest>>>,
}

impl HostChannel for SharedHost {
    fn push_event(&mut self, request: HostRequest) {
        self.outbox.borrow_mut().push(request);
    }
}

fn options(entries: &[(&str, &str, bool)]) -> Vec<OptionElement> {
    entries
        .iter()
        .map(|(v, l, s)| OptionElement::new(*v, *l, *s))
        .collect()
}

fn labelled(select: &SelectElement) -> Vec<(String, String)> {
    select
        .options
        .iter()
        .map(|o| (o.value.clone(), o.label.clone()))
        .collect()
}

#[test]
fn selection_flip_is_patched_in_place() {
    let authoritative = SelectElement::new(options(&[("1", "A", false), ("2", "B", true)]));
    let mut live = SelectElement::new(options(&[("1", "A", true), ("2", "B", false)]));

    let (a, l) = SnapshotExtractor::extract(Some(&authoritative), Some(&live));
    assert_eq!(DiffEngine::decide(&a, &l), ReconciliationDecision::SelectivePatch);

    SelectionPatcher::apply_selection(&mut live, &a);
    let patched = SnapshotExtractor::snapshot(Some(&live), SnapshotSource::Live);
    assert_eq!(patched.selected_values(), vec!["2"]);
}

#[test]
fn added_option_rebuilds_in_authoritative_order() {
    let mut root = ComboBoxRoot::new(
        SelectElement::new(options(&[("3", "C", false), ("1", "A", false), ("2", "B", true)])),
        SelectElement::new(options(&[("1", "A", false), ("2", "B", true)])),
    )
    .with_data("options", "{}")
    .with_data("plugins", "[]");
    let mut combo = ComboBox::mount(&mut root, ScriptedEnhancer::default(), SharedHost::default())
        .unwrap();

    let outcome = combo.updated(&mut root).unwrap().unwrap();
    assert_eq!(outcome.decision, ReconciliationDecision::FullReinit);

    let authoritative = root.authoritative.as_ref().unwrap();
    let live = root.live.as_ref().unwrap();
    assert_eq!(labelled(live), labelled(authoritative));
    assert_eq!(
        labelled(live),
        vec![
            ("3".to_string(), "C".to_string()),
            ("1".to_string(), "A".to_string()),
            ("2".to_string(), "B".to_string()),
        ]
    );
    assert_eq!(combo.enhancer().attached, vec![InstanceHandle(2)]);
}

#[test]
fn remote_search_round_trip() {
    let host = SharedHost::default();
    let outbox = host.outbox.clone();
    let mut root = ComboBoxRoot::new(
        SelectElement::new(Vec::new()),
        SelectElement::new(Vec::new()),
    )
    .with_data("options", r#"{"maxOptions": 20}"#)
    .with_data("plugins", "[]")
    .with_data("remoteOptionsEventName", "search_cities");
    let mut combo = ComboBox::mount(&mut root, ScriptedEnhancer::default(), host).unwrap();
    assert!(combo.enhancer().settings[0].remote_load);

    let received: Rc<RefCell<Vec<Vec<LoadedOption>>>> = Rc::default();
    let sink = received.clone();
    let id = combo
        .search("ber", Box::new(move |results| sink.borrow_mut().push(results)))
        .unwrap();

    let sent = outbox.borrow().clone();
    assert_eq!(
        sent,
        vec![HostRequest {
            event_name: "search_cities".to_string(),
            payload: "ber".to_string(),
            target: None,
            correlation_id: id,
        }]
    );

    assert!(
        combo
            .receive_reply_json(id, r#"{"results":[{"text":"Berlin","value":"BER"}]}"#)
            .unwrap()
    );
    assert_eq!(
        *received.borrow(),
        vec![vec![LoadedOption {
            text: "Berlin".to_string(),
            value: "BER".to_string(),
        }]]
    );
}

#[test]
fn reply_after_destroy_is_ignored() {
    let mut root = ComboBoxRoot::new(SelectElement::new(Vec::new()), SelectElement::new(Vec::new()))
        .with_data("options", "{}")
        .with_data("plugins", "[]")
        .with_data("remoteOptionsEventName", "search")
        .with_data("remoteOptionsTarget", "#picker");
    let mut combo =
        ComboBox::mount(&mut root, ScriptedEnhancer::default(), SharedHost::default()).unwrap();

    let received = Rc::new(RefCell::new(0));
    let sink = received.clone();
    let id = combo
        .search("par", Box::new(move |_| *sink.borrow_mut() += 1))
        .unwrap();

    combo.destroy();
    assert!(!combo.receive_reply(id, HostReply { results: Vec::new() }));
    assert!(!combo.receive_reply(CorrelationId::new(), HostReply { results: Vec::new() }));
    assert_eq!(*received.borrow(), 0);
    assert!(combo.enhancer().attached.is_empty());
}

#[test]
fn remote_mode_syncs_server_selection_onto_live() {
    let mut root = ComboBoxRoot::new(
        SelectElement::multiple(options(&[("BER", "Berlin", true), ("PAR", "Paris", true)])),
        SelectElement::multiple(options(&[("BER", "Berlin", false), ("PAR", "Paris", false)])),
    )
    .with_data("options", "{}")
    .with_data("plugins", "[]")
    .with_data("remoteOptionsEventName", "search");
    let mut combo =
        ComboBox::mount(&mut root, ScriptedEnhancer::default(), SharedHost::default()).unwrap();

    let outcome = combo.updated(&mut root).unwrap().unwrap();
    assert_eq!(outcome.decision, ReconciliationDecision::NoOp);
    let live = root.live.as_ref().unwrap();
    assert_eq!(live.selected_values(), vec!["BER".to_string(), "PAR".to_string()]);
    assert_eq!(combo.instance().map(|i| i.generation), Some(1));
}

#[test]
fn local_multi_select_survives_repeated_rerenders() {
    let entries = [("1", "A", true), ("2", "B", true), ("3", "C", false)];
    let mut root = ComboBoxRoot::new(
        SelectElement::multiple(options(&entries)),
        SelectElement::multiple(options(&entries)),
    )
    .with_data("options", "{}")
    .with_data("plugins", r#"["remove_button"]"#);
    let mut combo =
        ComboBox::mount(&mut root, ScriptedEnhancer::default(), SharedHost::default()).unwrap();

    for _ in 0..3 {
        let outcome = combo.updated(&mut root).unwrap().unwrap();
        assert_eq!(outcome.decision, ReconciliationDecision::NoOp);
    }
    let live = root.live.as_ref().unwrap();
    assert_eq!(live.selected_values(), vec!["1".to_string(), "2".to_string()]);

    // The user adds "3"; the server markup still carries the old selection.
    root.live.as_mut().unwrap().options[2].selected = true;
    let outcome = combo.updated(&mut root).unwrap().unwrap();
    assert_eq!(outcome.decision, ReconciliationDecision::NoOp);
    assert_eq!(
        root.live.as_ref().unwrap().selected_values(),
        vec!["1".to_string(), "2".to_string(), "3".to_string()]
    );
    assert_eq!(combo.instance().map(|i| i.generation), Some(1));
}

#[test]
fn local_mode_keeps_user_selection() {
    let mut root = ComboBoxRoot::new(
        SelectElement::new(options(&[("1", "A", true), ("2", "B", false)])),
        SelectElement::new(options(&[("1", "A", false), ("2", "B", true)])),
    )
    .with_data("options", "{}")
    .with_data("plugins", "[]");
    let mut combo =
        ComboBox::mount(&mut root, ScriptedEnhancer::default(), SharedHost::default()).unwrap();

    let outcome = combo.updated(&mut root).unwrap().unwrap();
    assert_eq!(outcome.decision, ReconciliationDecision::NoOp);
    assert_eq!(root.live.as_ref().unwrap().value(), "2");
    assert_eq!(root.authoritative.as_ref().unwrap().value(), "2");
}

#[test]
fn global_options_reach_the_enhancer_with_lowest_precedence() {
    register_global_options(
        "scenarioDefaults",
        json!({"create": false, "maxItems": 1}).as_object().unwrap().clone(),
    );
    let mut root = ComboBoxRoot::new(SelectElement::new(Vec::new()), SelectElement::new(Vec::new()))
        .with_data("options", r#"{"maxItems": null}"#)
        .with_data("plugins", r#"["remove_button"]"#)
        .with_data("globalOptions", "scenarioDefaults");
    let combo =
        ComboBox::mount(&mut root, ScriptedEnhancer::default(), SharedHost::default()).unwrap();

    let settings = &combo.enhancer().settings[0];
    assert_eq!(
        serde_json::Value::Object(settings.options.clone()),
        json!({"create": false, "maxItems": null, "plugins": ["remove_button"]})
    );
    assert_eq!(settings.plugins, vec!["remove_button".to_string()]);
}
