use std::{
    collections::{HashMap, VecDeque},
    time::{Duration, Instant},
};

use ferry_shared::{sequence_less_than, TransportErrorCode};

/// Most unacknowledged packets a reliable lane will hold before refusing sends
pub const SEND_WINDOW: usize = 1024;
/// How far ahead of the next expected sequence a packet may arrive and still be buffered
pub const RECEIVE_WINDOW: u16 = 1024;

struct InFlight {
    sequence: u16,
    packet: Vec<u8>,
    last_sent: Instant,
}

/// Keeps every reliable packet until it is acknowledged, and hands back the
/// ones that have waited longer than the resend interval
pub struct ReliableSender {
    next_sequence: u16,
    in_flight: VecDeque<InFlight>,
}

impl ReliableSender {
    pub fn new() -> Self {
        Self {
            next_sequence: 0,
            in_flight: VecDeque::new(),
        }
    }

    /// Reserves the sequence number for the next packet
    pub fn next_sequence(&mut self) -> Result<u16, TransportErrorCode> {
        if self.in_flight.len() >= SEND_WINDOW {
            return Err(TransportErrorCode::NoResources);
        }
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);
        Ok(sequence)
    }

    pub fn track(&mut self, sequence: u16, packet: Vec<u8>, now: Instant) {
        self.in_flight.push_back(InFlight {
            sequence,
            packet,
            last_sent: now,
        });
    }

    /// Forgets an acknowledged packet. Returns false for unknown or repeated acks.
    pub fn ack(&mut self, sequence: u16) -> bool {
        let Some(index) = self
            .in_flight
            .iter()
            .position(|entry| entry.sequence == sequence)
        else {
            return false;
        };
        self.in_flight.remove(index);
        true
    }

    /// Calls `send` with every packet not sent within `interval`
    pub fn resend_due<F: FnMut(&[u8])>(&mut self, now: Instant, interval: Duration, mut send: F) {
        for entry in self.in_flight.iter_mut() {
            if now.duration_since(entry.last_sent) >= interval {
                send(&entry.packet);
                entry.last_sent = now;
            }
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}

impl Default for ReliableSender {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases reliable payloads strictly in sequence order, holding back any
/// that arrive early and discarding duplicates
pub struct OrderedReceiver {
    next_expected: u16,
    buffered: HashMap<u16, Vec<u8>>,
}

impl OrderedReceiver {
    pub fn new() -> Self {
        Self {
            next_expected: 0,
            buffered: HashMap::new(),
        }
    }

    /// Accepts one packet and returns the payloads now deliverable, in order.
    ///
    /// Returns `None` when the packet is too far ahead to buffer; it must not be
    /// acknowledged so the sender retries it later. Duplicates return an empty
    /// list and should be acknowledged again.
    pub fn receive(&mut self, sequence: u16, payload: Vec<u8>) -> Option<Vec<Vec<u8>>> {
        if sequence_less_than(sequence, self.next_expected) {
            return Some(Vec::new());
        }
        if sequence.wrapping_sub(self.next_expected) >= RECEIVE_WINDOW {
            return None;
        }

        self.buffered.entry(sequence).or_insert(payload);

        let mut released = Vec::new();
        while let Some(payload) = self.buffered.remove(&self.next_expected) {
            released.push(payload);
            self.next_expected = self.next_expected.wrapping_add(1);
        }
        Some(released)
    }

    pub fn buffered(&self) -> usize {
        self.buffered.len()
    }
}

impl Default for OrderedReceiver {
    fn default() -> Self {
        Self::new()
    }
}
