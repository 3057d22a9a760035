//! DOM implementation of the ballot surface.

use crate::error::AppError;
use crate::page::{label_thumbnail_selector, scoped_thumbnail_selector};
use ballotbox_core::{BallotEvent, BallotSurface, BallotWidget, CandidateId, MarkupConfig, MirrorKey};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlInputElement};

/// The widget as shared with DOM listeners.
pub type SharedWidget = Rc<RefCell<BallotWidget<DomSurface>>>;

pub(crate) fn js_error(context: &str, err: JsValue) -> AppError {
    AppError::Markup(format!("{}: {:?}", context, err))
}

/// Routes events raised by DOM listeners back into the widget.
///
/// Holds only a weak handle so listeners never keep the widget alive.
#[derive(Clone, Default)]
pub struct Dispatcher {
    target: Rc<RefCell<Weak<RefCell<BallotWidget<DomSurface>>>>>,
}

impl Dispatcher {
    pub fn attach(&self, widget: &SharedWidget) {
        *self.target.borrow_mut() = Rc::downgrade(widget);
    }

    pub fn dispatch(&self, event: BallotEvent) {
        let Some(widget) = self.target.borrow().upgrade() else {
            log::warn!("Dropping {:?}: widget is gone", event);
            return;
        };
        // Handlers run to completion; a nested dispatch would see half an update.
        match widget.try_borrow_mut() {
            Ok(mut widget) => {
                widget.handle(event);
            }
            Err(_) => log::warn!("Dropping re-entrant {:?}", event),
        }
    }
}

/// A mirror node in the sidebar and the click handler bound to it.
struct MirrorNode {
    node: Element,
    on_click: Closure<dyn FnMut(Event)>,
}

/// Ballot surface backed by the page's DOM.
pub struct DomSurface {
    document: Document,
    markup: MarkupConfig,
    /// Selection controls in document order.
    controls: Vec<(CandidateId, HtmlInputElement)>,
    mirrors: HashMap<MirrorKey, MirrorNode>,
    dispatcher: Dispatcher,
}

impl DomSurface {
    /// Collect the selection controls matching the configured selector.
    pub fn new(
        document: Document,
        markup: MarkupConfig,
        dispatcher: Dispatcher,
    ) -> Result<Self, AppError> {
        let nodes = document
            .query_selector_all(&markup.control_selector)
            .map_err(|e| js_error("Invalid control selector", e))?;

        let mut controls = Vec::with_capacity(nodes.length() as usize);
        for i in 0..nodes.length() {
            let Some(input) = nodes
                .item(i)
                .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
            else {
                continue;
            };
            let id = input.id();
            if id.is_empty() {
                log::warn!("Skipping selection control without an id");
                continue;
            }
            controls.push((CandidateId::new(id), input));
        }
        log::info!("Found {} candidate controls", controls.len());

        Ok(Self {
            document,
            markup,
            controls,
            mirrors: HashMap::new(),
            dispatcher,
        })
    }

    /// Bind a change listener on every control. Listeners live as long as
    /// the page.
    pub fn bind_controls(&self) -> Result<(), AppError> {
        for (id, input) in &self.controls {
            let dispatcher = self.dispatcher.clone();
            let id = id.clone();
            let target = input.clone();
            let on_change = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                dispatcher.dispatch(BallotEvent::Toggled {
                    id: id.clone(),
                    checked: target.checked(),
                });
            });
            input
                .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
                .map_err(|e| js_error("Failed to bind control", e))?;
            on_change.forget();
        }
        Ok(())
    }

    fn input(&self, id: &CandidateId) -> Option<&HtmlInputElement> {
        self.controls
            .iter()
            .find(|(candidate, _)| candidate == id)
            .map(|(_, input)| input)
    }

    /// The thumbnail inside the label of a control: the label bound with
    /// `for`, else the first sibling label holding one.
    fn thumbnail(&self, id: &CandidateId) -> Option<Element> {
        let class = &self.markup.thumbnail_class;
        let bound = label_thumbnail_selector(id.as_str(), class);
        if let Ok(Some(thumb)) = self.document.query_selector(&bound) {
            return Some(thumb);
        }

        let input = self.input(id)?;
        let scoped = scoped_thumbnail_selector(class);
        let mut sibling = input.parent_element()?.first_element_child();
        while let Some(element) = sibling {
            if element.tag_name().eq_ignore_ascii_case("label") {
                if let Ok(Some(thumb)) = element.query_selector(&scoped) {
                    return Some(thumb);
                }
            }
            sibling = element.next_element_sibling();
        }
        None
    }

    fn mark_class(&self, class: &str, at_limit: bool) {
        let Ok(nodes) = self.document.query_selector_all(&format!(".{}", class)) else {
            log::warn!("Invalid decorative class {}", class);
            return;
        };
        for i in 0..nodes.length() {
            let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            if let Err(e) = element
                .class_list()
                .toggle_with_force(&self.markup.limit_class, at_limit)
            {
                log::warn!("Failed to toggle {}: {:?}", self.markup.limit_class, e);
            }
        }
    }
}

impl BallotSurface for DomSurface {
    fn candidates(&self) -> Vec<CandidateId> {
        self.controls.iter().map(|(id, _)| id.clone()).collect()
    }

    fn is_checked(&self, id: &CandidateId) -> bool {
        self.input(id).is_some_and(|input| input.checked())
    }

    fn set_checked(&mut self, id: &CandidateId, checked: bool) {
        if let Some(input) = self.input(id) {
            input.set_checked(checked);
        }
    }

    fn is_enabled(&self, id: &CandidateId) -> bool {
        self.input(id).is_some_and(|input| !input.disabled())
    }

    fn set_enabled(&mut self, id: &CandidateId, enabled: bool) {
        if let Some(input) = self.input(id) {
            input.set_disabled(!enabled);
        }
    }

    fn set_limit_marker(&mut self, at_limit: bool) {
        for class in &self.markup.decorative_classes {
            self.mark_class(class, at_limit);
        }
    }

    fn mount_mirror(&mut self, id: &CandidateId, key: &MirrorKey) {
        if self.mirrors.contains_key(key) {
            return;
        }
        let Some(sidebar) = self.document.get_element_by_id(&self.markup.sidebar_id) else {
            log::warn!("No #{} element, mirror for {} not shown", self.markup.sidebar_id, id);
            return;
        };
        let Some(node) = self
            .thumbnail(id)
            .and_then(|thumb| thumb.clone_node_with_deep(true).ok())
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            log::warn!("No thumbnail for {}, mirror not shown", id);
            return;
        };
        node.set_id(key.as_str());

        let dispatcher = self.dispatcher.clone();
        let candidate = id.clone();
        let on_click = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            dispatcher.dispatch(BallotEvent::MirrorActivated {
                id: candidate.clone(),
            });
        });
        if let Err(e) =
            node.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        {
            log::warn!("Failed to bind mirror {}: {:?}", key, e);
        }
        if let Err(e) = sidebar.append_child(&node) {
            log::warn!("Failed to append mirror {}: {:?}", key, e);
            return;
        }
        self.mirrors.insert(key.clone(), MirrorNode { node, on_click });
    }

    fn unmount_mirror(&mut self, key: &MirrorKey) {
        let Some(mirror) = self.mirrors.remove(key) else {
            return;
        };
        if let Err(e) = mirror
            .node
            .remove_event_listener_with_callback("click", mirror.on_click.as_ref().unchecked_ref())
        {
            log::warn!("Failed to unbind mirror {}: {:?}", key, e);
        }
        mirror.node.remove();
    }

    fn set_status(&mut self, text: &str) {
        match self.document.get_element_by_id(&self.markup.status_id) {
            Some(element) => element.set_text_content(Some(text)),
            None => log::warn!("No #{} element for the status line", self.markup.status_id),
        }
    }
}
