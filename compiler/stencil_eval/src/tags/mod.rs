//! Built-in tags.
//!
//! Each tag is a [`TagDefinition`](crate::TagDefinition) that parses its
//! markup (and body, for block tags) into a [`Node`](crate::Node) variant,
//! plus the `render` for that variant.

mod assign;
mod case;
mod condition;
mod cycle;
mod for_loop;
mod if_tag;
mod simple;

pub use assign::{AssignNode, AssignTag, CaptureNode, CaptureTag};
pub use case::{CaseNode, CaseTag, When};
pub use condition::{Comparison, Condition};
pub use cycle::{CycleNode, CycleTag};
pub use for_loop::{ForNode, ForTag, LoopSource};
pub use if_tag::{Branch, IfNode, IfTag};
pub use simple::{CommentTag, CounterTag, IfchangedTag, InterruptTag, RawTag};
