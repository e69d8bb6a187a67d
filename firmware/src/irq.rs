//! Interrupt Dispatch
//!
//! One interrupt controller, one handler per vector. The CPU's external
//! interrupt lands in [`Dispatcher::dispatch`], which walks the active
//! vectors lowest first, runs each connected handler and acknowledges the
//! vector once its handler returned.

use core::sync::atomic::{AtomicU32, Ordering};

use common::arch::ArchIrq;
use common::sync::IrqSpinLock;
use drivers::hal::interrupt::{
    IntcError, InterruptController, MAX_VECTORS, StartMode, VectorId, check_vector,
};
use log::{debug, warn};

/// Interrupt handler. Receives the context it was connected with.
pub type Handler<C> = fn(&C);

/// Handler per vector.
pub struct VectorTable<C> {
    handlers: [Option<Handler<C>>; MAX_VECTORS],
}

impl<C> VectorTable<C> {
    pub const fn new() -> Self {
        Self {
            handlers: [None; MAX_VECTORS],
        }
    }

    /// Connect `handler` to `vector`, replacing any previous one.
    pub fn connect(&mut self, vector: VectorId, handler: Handler<C>) -> Result<(), IntcError> {
        check_vector(vector)?;
        self.handlers[vector as usize] = Some(handler);
        Ok(())
    }

    pub fn get(&self, vector: VectorId) -> Option<Handler<C>> {
        self.handlers.get(vector as usize).copied().flatten()
    }

    pub fn is_connected(&self, vector: VectorId) -> bool {
        self.get(vector).is_some()
    }
}

impl<C> Default for VectorTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// An interrupt controller plus the handlers connected to it.
pub struct Dispatcher<I, C> {
    intc: IrqSpinLock<I, ArchIrq>,
    vectors: VectorTable<C>,
    unhandled: AtomicU32,
}

impl<I, C> Dispatcher<I, C>
where
    I: InterruptController<Error = IntcError>,
{
    pub fn new(intc: I) -> Self {
        Self {
            intc: IrqSpinLock::new(intc),
            vectors: VectorTable::new(),
            unhandled: AtomicU32::new(0),
        }
    }

    pub fn connect(&mut self, vector: VectorId, handler: Handler<C>) -> Result<(), IntcError> {
        self.vectors.connect(vector, handler)
    }

    /// Connect `handler` to `vector` and unmask the vector.
    pub fn attach(&mut self, vector: VectorId, handler: Handler<C>) -> Result<(), IntcError> {
        self.connect(vector, handler)?;
        self.enable(vector)?;
        debug!("irq: vector {} attached", vector);
        Ok(())
    }

    pub fn enable(&self, vector: VectorId) -> Result<(), IntcError> {
        self.intc.with(|intc| intc.enable(vector))
    }

    pub fn start(&self, mode: StartMode) -> Result<(), IntcError> {
        self.intc.with(|intc| intc.start(mode))
    }

    pub fn is_connected(&self, vector: VectorId) -> bool {
        self.vectors.is_connected(vector)
    }

    /// Active vectors that had no handler, since boot.
    pub fn unhandled(&self) -> u32 {
        self.unhandled.load(Ordering::Relaxed)
    }

    /// Service every vector active on entry. Returns how many were handled.
    ///
    /// Vectors raised while handlers run are picked up by the next
    /// interrupt.
    pub fn dispatch(&self, ctx: &C) -> u32 {
        let mut active = self.intc.with(|intc| intc.active());
        let mut handled = 0;

        while active != 0 {
            let vector = active.trailing_zeros() as VectorId;
            active &= active - 1;

            match self.vectors.get(vector) {
                Some(handler) => {
                    handler(ctx);
                    handled += 1;
                }
                None => {
                    self.unhandled.fetch_add(1, Ordering::Relaxed);
                    warn!("irq: no handler for vector {}", vector);
                }
            }

            // acknowledge after the handler cleared the source
            self.intc.with(|intc| intc.acknowledge(vector)).ok();
        }

        handled
    }
}
