//! Portable single-slot mailbox for `no_std` environments.
//!
//! The poll loop delivers mode strings from another execution context
//! (task or interrupt); the render loop picks them up at the start of a
//! tick. Only the newest string matters, so the mailbox holds one value and
//! `put` replaces any undelivered predecessor. Synchronization is a
//! critical section, making the handoff a whole-value swap: the render side
//! never observes a partially written configuration.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::String;

/// Capacity of a [`ModeString`]: 6 header characters plus 6 hex characters
/// per palette slot (150 for a 24-slot palette), rounded up.
pub const MODE_STRING_CAPACITY: usize = 160;

/// A raw mode string as received from the server.
pub type ModeString = String<MODE_STRING_CAPACITY>;

/// A bounded, thread-safe, latest-wins mailbox.
pub struct Mailbox<T> {
    slot: Mutex<RefCell<Option<T>>>,
}

impl<T> Mailbox<T> {
    /// Create a new empty mailbox.
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(RefCell::new(None)),
        }
    }

    /// Get a sender handle for this mailbox.
    pub const fn sender(&self) -> Sender<'_, T> {
        Sender { mailbox: self }
    }

    /// Get a receiver handle for this mailbox.
    pub const fn receiver(&self) -> Receiver<'_, T> {
        Receiver { mailbox: self }
    }

    /// Put a value into the mailbox, replacing any undelivered value.
    ///
    /// Returns the value that was displaced, if any.
    pub fn put(&self, value: T) -> Option<T> {
        critical_section::with(|cs| self.slot.borrow(cs).borrow_mut().replace(value))
    }

    /// Take the pending value out of the mailbox, if any.
    pub fn take(&self) -> Option<T> {
        critical_section::with(|cs| self.slot.borrow(cs).borrow_mut().take())
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A sender handle for a [`Mailbox`].
///
/// This is a lightweight reference that can be cloned and passed around.
pub struct Sender<'a, T> {
    mailbox: &'a Mailbox<T>,
}

impl<T> Clone for Sender<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Sender<'_, T> {}

impl<T> Sender<'_, T> {
    /// Put a value into the mailbox, replacing any undelivered value.
    pub fn put(&self, value: T) -> Option<T> {
        self.mailbox.put(value)
    }
}

/// A receiver handle for a [`Mailbox`].
///
/// This is a lightweight reference that can be cloned and passed around.
pub struct Receiver<'a, T> {
    mailbox: &'a Mailbox<T>,
}

impl<T> Clone for Receiver<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Receiver<'_, T> {}

impl<T> Receiver<'_, T> {
    /// Take the pending value out of the mailbox, if any.
    pub fn take(&self) -> Option<T> {
        self.mailbox.take()
    }
}

/// Type alias for the mode string mailbox.
pub type ModeMailbox = Mailbox<ModeString>;

/// Type alias for the mode string sender.
pub type ModeSender<'a> = Sender<'a, ModeString>;

/// Type alias for the mode string receiver.
pub type ModeReceiver<'a> = Receiver<'a, ModeString>;
