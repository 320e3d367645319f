//! Per-tick command loop.
//!
//! [`RemoteControl`] owns the command accumulator and the response queue.
//! Each [`tick`](RemoteControl::tick) pulls whatever the transport has,
//! dispatches every complete frame in arrival order, keeps any partial frame
//! for the next tick, and pushes pending responses back out. Nothing blocks.

use crate::cmdbuf::{CommandBuffer, CMD_BUFFER_SIZE};
use crate::config::ControlConfig;
use crate::dispatch::dispatch;
use crate::layer::LayerStore;
use crate::protocol::{is_delimiter, ErrorCode, Response};
use crate::response::{ResponseQueue, RESPONSE_QUEUE_SIZE};
use crate::transport::Transport;

/// Running counters, for status reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlStats {
    /// Frames handed to the dispatcher
    pub frames: u32,
    /// Error responses generated (including overflows)
    pub errors: u32,
    /// Input overflow resets
    pub overflows: u32,
    /// Responses dropped because the queue was full
    pub dropped_responses: u32,
}

impl ControlStats {
    pub const fn new() -> Self {
        Self {
            frames: 0,
            errors: 0,
            overflows: 0,
            dropped_responses: 0,
        }
    }
}

pub struct RemoteControl<const C: usize = CMD_BUFFER_SIZE, const N: usize = RESPONSE_QUEUE_SIZE> {
    cmd: CommandBuffer<C>,
    out: ResponseQueue<N>,
    config: ControlConfig,
    stats: ControlStats,
}

impl<const C: usize, const N: usize> RemoteControl<C, N> {
    pub const fn new(config: ControlConfig) -> Self {
        Self {
            cmd: CommandBuffer::new(),
            out: ResponseQueue::new(),
            config,
            stats: ControlStats::new(),
        }
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ControlConfig) {
        self.config = config;
    }

    pub fn stats(&self) -> ControlStats {
        self.stats
    }

    /// Bytes of an unterminated frame carried over to the next tick.
    pub fn buffered(&self) -> usize {
        self.cmd.len()
    }

    /// Response bytes not yet accepted by the transport.
    pub fn pending_responses(&self) -> usize {
        self.out.len()
    }

    /// Run one receive / dispatch / send cycle.
    pub fn tick<T, L>(&mut self, transport: &mut T, layers: &mut L)
    where
        T: Transport + ?Sized,
        L: LayerStore,
    {
        self.receive(transport);
        self.process(layers);
        self.flush(transport);
    }

    fn receive<T: Transport + ?Sized>(&mut self, transport: &mut T) {
        if self.cmd.remaining() == 0 {
            // Buffer filled without a delimiter: drop the garbage and report
            log::warn!("command buffer overflow, discarding {} bytes", self.cmd.len());
            self.cmd.clear();
            self.stats.overflows = self.stats.overflows.wrapping_add(1);
            self.respond(Response::Err(ErrorCode::Overflow));
        }

        let region = self.cmd.writable_region();
        let capacity = region.len();
        let received = transport.receive(region).min(capacity);
        if received > 0 {
            self.cmd.commit(received);
        }
    }

    fn process<L: LayerStore>(&mut self, layers: &mut L) {
        let mut first = 0;
        for i in 0..self.cmd.len() {
            if !is_delimiter(self.cmd.byte_at(i)) {
                continue;
            }
            if i > first {
                let response = dispatch(&self.cmd.as_slice()[first..i], &self.config, &mut *layers);
                self.stats.frames = self.stats.frames.wrapping_add(1);
                self.respond(response);
            }
            first = i + 1;
        }
        if first > 0 {
            self.cmd.compact(first);
        }
    }

    fn flush<T: Transport + ?Sized>(&mut self, transport: &mut T) {
        if self.out.is_empty() {
            return;
        }
        let chunk = self.out.peek();
        let sent = transport.send(chunk).min(chunk.len());
        self.out.consume(sent);
    }

    fn respond(&mut self, response: Response) {
        if let Response::Err(_) = response {
            self.stats.errors = self.stats.errors.wrapping_add(1);
        }
        if !self.out.push(response) {
            self.stats.dropped_responses = self.stats.dropped_responses.wrapping_add(1);
        }
    }
}

impl<const C: usize, const N: usize> Default for RemoteControl<C, N> {
    fn default() -> Self {
        Self::new(ControlConfig::new())
    }
}
