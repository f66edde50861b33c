//! Per-render mutable state.
//!
//! A [`Context`] wraps the caller's data root and adds what a render needs
//! besides it:
//!
//! - a stack of scratch environments, for values that must not land in the
//!   data root (increment/decrement counters)
//! - registers: per-tag-name [`Data`] that survives across sibling and
//!   nested invocations of one tag within a single render
//! - the loop interrupt flag
//!
//! Loops are entered through the [`LoopScope`] guard, whose `Drop` undoes
//! the push on every exit path, including early interrupts, `?` returns and
//! unwinding.

use crate::{FilterRegistry, RenderError};
use rustc_hash::FxHashMap;
use std::ops::{Deref, DerefMut};
use stencil_value::{Data, SharedDrop};
use tracing::warn;

/// Register holding the stack of active `forloop` drops.
const FOR_REGISTER: &str = "for";

/// Loop-control signal raised by `break` / `continue`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Interrupt {
    Break,
    Continue,
}

/// Mutable state threaded through one render call.
pub struct Context<'a> {
    data: &'a mut Data,
    filters: &'a FilterRegistry,
    /// Never empty: the bottom environment lives for the whole render.
    environments: Vec<FxHashMap<String, Data>>,
    registers: FxHashMap<String, Data>,
    interrupt: Option<Interrupt>,
}

impl<'a> Context<'a> {
    pub fn new(data: &'a mut Data, filters: &'a FilterRegistry) -> Self {
        Context {
            data,
            filters,
            environments: vec![FxHashMap::default()],
            registers: FxHashMap::default(),
            interrupt: None,
        }
    }

    // Data root

    #[inline]
    pub fn data(&self) -> &Data {
        self.data
    }

    /// Bind `key` in the data root, overwriting any existing value.
    pub fn assign(&mut self, key: &str, value: Data) -> Result<(), RenderError> {
        self.data.set(key, value)?;
        Ok(())
    }

    #[inline]
    pub fn filters(&self) -> &'a FilterRegistry {
        self.filters
    }

    // Environments

    /// The integer counter `name`, created as 0 in the bottom environment
    /// when no environment holds it yet.
    fn counter(&mut self, name: &str) -> &mut Data {
        let depth = self
            .environments
            .iter()
            .rposition(|env| env.contains_key(name))
            .unwrap_or(0);
        self.environments[depth]
            .entry(name.to_owned())
            .or_insert(Data::Int(0))
    }

    /// Return the counter's value, then add one.
    pub fn increment(&mut self, name: &str) -> i64 {
        let counter = self.counter(name);
        let value = counter.to_integer().unwrap_or(0);
        *counter = Data::Int(value.wrapping_add(1));
        value
    }

    /// Subtract one from the counter, then return it.
    pub fn decrement(&mut self, name: &str) -> i64 {
        let counter = self.counter(name);
        let value = counter.to_integer().unwrap_or(0).wrapping_sub(1);
        *counter = Data::Int(value);
        value
    }

    // Registers

    /// Register state for `tag`, created as `Nil` on first use.
    pub fn register(&mut self, tag: &str) -> &mut Data {
        self.registers
            .entry(tag.to_owned())
            .or_insert(Data::Nil)
    }

    /// The `forloop` drop of the innermost active loop.
    pub fn current_forloop(&self) -> Option<SharedDrop> {
        match self.registers.get(FOR_REGISTER)?.as_array()?.last()? {
            Data::Drop(forloop) => Some(forloop.clone()),
            _ => None,
        }
    }

    fn push_forloop(&mut self, forloop: SharedDrop) {
        match self.register(FOR_REGISTER) {
            Data::Array(stack) => stack.push(Data::Drop(forloop)),
            slot => {
                if !slot.is_nil() {
                    warn!(tag = FOR_REGISTER, "register held a non-array value; resetting");
                }
                *slot = Data::Array(vec![Data::Drop(forloop)]);
            }
        }
    }

    fn pop_forloop(&mut self) {
        if let Data::Array(stack) = self.register(FOR_REGISTER) {
            stack.pop();
        }
    }

    /// Enter a loop: push a scratch environment and `forloop` onto the loop
    /// stack, and remember the data-root bindings the loop will shadow.
    pub fn loop_scope<'g>(
        &'g mut self,
        variable: &'g str,
        forloop: SharedDrop,
    ) -> LoopScope<'g, 'a> {
        let saved = [
            self.binding(variable),
            self.binding("forloop"),
        ];
        self.push_forloop(forloop);
        self.environments.push(FxHashMap::default());
        LoopScope {
            context: self,
            variable,
            saved,
        }
    }

    fn binding(&self, key: &str) -> Option<Data> {
        self.data.as_hash().and_then(|hash| hash.get(key)).cloned()
    }

    fn restore(&mut self, key: &str, saved: Option<Data>) {
        match saved {
            // The root was a hash when the binding was taken.
            Some(value) => {
                let _ = self.data.set(key, value);
            }
            None => {
                self.data.remove(key);
            }
        }
    }

    // Interrupts

    #[inline]
    pub fn interrupt(&self) -> Option<Interrupt> {
        self.interrupt
    }

    #[inline]
    pub fn has_interrupt(&self) -> bool {
        self.interrupt.is_some()
    }

    pub fn set_interrupt(&mut self, interrupt: Interrupt) {
        self.interrupt = Some(interrupt);
    }

    /// Consume the pending interrupt, clearing the flag.
    pub fn take_interrupt(&mut self) -> Option<Interrupt> {
        self.interrupt.take()
    }
}

/// Guard for one `for` loop. Derefs to the [`Context`].
///
/// On drop: pops the loop's environment and its `forloop` drop, and puts
/// the loop variable and `forloop` bindings back the way they were.
pub struct LoopScope<'g, 'a> {
    context: &'g mut Context<'a>,
    variable: &'g str,
    saved: [Option<Data>; 2],
}

impl Drop for LoopScope<'_, '_> {
    fn drop(&mut self) {
        let [variable, forloop] = std::mem::take(&mut self.saved);
        self.context.environments.pop();
        self.context.pop_forloop();
        self.context.restore(self.variable, variable);
        self.context.restore("forloop", forloop);
    }
}

impl<'a> Deref for LoopScope<'_, 'a> {
    type Target = Context<'a>;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl DerefMut for LoopScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context
    }
}
