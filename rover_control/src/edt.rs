use alloc::vec::Vec;

use no_std_compat::cell::{Cell, RefCell};

/// Upper bound of messages in flight. The control loop keeps two.
pub const QUEUE_CAPACITY: usize = 8;

#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub struct Msg<T: Sized> {
    pub when: u64,
    pub order: u32,
    pub payload: T,
}

/// Event dispatch thread: a virtual clock and a queue of delayed messages.
///
/// The clock counts milliseconds in 64 bits and does not wrap while the board runs.
///
/// Time only moves when [EDT::poll] tells the caller to wait (or in tests, when
/// [EDT::advance_time_by] is called), so the control logic never sleeps by itself.
pub struct EDT<T> {
    now: Cell<u64>,
    sequence: Cell<u32>,
    queue: RefCell<Vec<Msg<T>>>,
}

pub enum Event<T> {
    Execute { msg: T },
    Wait { ms: u32 },
    Halt,
}

impl<T: Copy> EDT<T> {
    pub fn create() -> EDT<T> {
        EDT {
            now: Cell::new(0),
            sequence: Cell::new(0),
            queue: RefCell::new(Vec::with_capacity(QUEUE_CAPACITY)),
        }
    }

    pub fn now(&self) -> u64 {
        self.now.get()
    }

    /// Either hands out the next due message, or the time to wait until it is due.
    /// The clock is moved forward when a wait is returned.
    pub fn poll(&self) -> Event<T> {
        let head = match self.head_position() {
            Some(position) => position,
            None => return Event::Halt,
        };

        let when = self.queue.borrow()[head].when;
        let now = self.now.get();
        if when > now {
            self.now.set(when);
            // delays are scheduled as u32, so the gap to the head fits
            Event::Wait {
                ms: (when - now) as u32,
            }
        } else {
            let msg = self.queue.borrow_mut().swap_remove(head);
            Event::Execute { msg: msg.payload }
        }
    }

    /// Advances the time by the given value and feeds due messages to the handler
    #[cfg(not(target_os = "none"))]
    pub fn advance_time_by(&self, time: u32, handler: &dyn Fn(T)) {
        let target = self.now.get() + time as u64;
        while let Some(head) = self.head_position() {
            let msg = self.queue.borrow()[head];
            if msg.when > target {
                break;
            }
            self.queue.borrow_mut().swap_remove(head);
            self.now.set(msg.when);
            handler(msg.payload);
        }
        self.now.set(target);
    }

    pub fn schedule(&self, delay: u32, payload: T) {
        let order = self.sequence.get();
        self.sequence.set(order.wrapping_add(1));

        self.queue.borrow_mut().push(Msg {
            when: self.now.get() + delay as u64,
            order,
            payload,
        });

        debug_assert!(self.queue.borrow().len() <= QUEUE_CAPACITY);
    }

    /// Drops everything, the next [EDT::poll] halts
    pub fn exit(&self) {
        self.queue.borrow_mut().clear();
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Earliest message, ties broken by scheduling order
    fn head_position(&self) -> Option<usize> {
        self.queue
            .borrow()
            .iter()
            .enumerate()
            .min_by_key(|(_, msg)| (msg.when, msg.order))
            .map(|(position, _)| position)
    }
}
