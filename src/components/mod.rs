//! UI Components
//!
//! Reusable Leptos components.

mod accordion;
mod accordion_item;
mod chart_control;
mod markdown_editor;
mod markdown_viewer;

pub use accordion::{Accordion, AccordionContext};
pub use accordion_item::AccordionItem;
pub use chart_control::ChartControl;
pub use markdown_editor::MarkdownEditor;
pub use markdown_viewer::MarkdownViewer;
