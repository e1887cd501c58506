use crate::semantic::{ParseEvent, ParseObserver};

/// Forwards parse events to the `log` facade.
/// Pass it to the `*_observed` parse functions while debugging a scene file.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ParseObserver for LogObserver {
    fn on_event(&mut self, event: &ParseEvent<'_>) {
        match event {
            ParseEvent::Line { number, text } => log::trace!("line {number}: {text}"),
            ParseEvent::Header { load_steps, format } => {
                log::debug!("scene header: load_steps={load_steps} format={format}")
            }
            ParseEvent::ResourceRegistered { kind, key } => {
                log::debug!("registered {} {key}", kind.section())
            }
            ParseEvent::ResourceDropped { kind, line } => {
                log::debug!("dropped {} without a usable key: {line}", kind.section())
            }
            ParseEvent::NodeStarted {
                name,
                node_type,
                parent_ref,
            } => log::debug!("node {name} ({node_type}) parent={parent_ref:?}"),
            ParseEvent::PropertySet { node, key } => log::trace!("{node}.{key} set"),
            ParseEvent::MultilineDiscarded { key, bytes } => {
                log::warn!("input ended inside the quoted value of `{key}`, {bytes} bytes discarded")
            }
            ParseEvent::RootDesignated { name } => log::debug!("root node: {name}"),
            ParseEvent::ParentResolved {
                node,
                parent_path,
                via,
            } => log::debug!("{node} -> {parent_path} ({via:?})"),
            ParseEvent::AttachedToRoot { node, parent_ref } => {
                log::debug!("parent {parent_ref:?} of {node} not found, attached to root")
            }
            ParseEvent::Finished { nodes } => log::debug!("parsed {nodes} nodes"),
        }
    }
}
