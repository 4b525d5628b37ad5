//! Mock GameTransport implementation for testing

use crate::error::{ClientError, ClientResult};
use crate::protocol::{ClientMessage, ServerMessage};
use crate::traits::GameTransport;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted transport - only compiled in test mode or with mock feature.
///
/// Queued server messages are handed out in order by `recv`; once the
/// queue is drained the connection reads as closed. Everything passed to
/// `send` is recorded in a call log shared between clones.
#[cfg(any(test, feature = "mock"))]
#[derive(Clone, Default)]
pub struct MockTransport {
    incoming: Arc<Mutex<VecDeque<ClientResult<ServerMessage>>>>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
    fail_sends: bool,
}

#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Send(ClientMessage),
    Recv,
    Close,
}

#[cfg(any(test, feature = "mock"))]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a message for `recv`
    pub fn with_message(self, message: ServerMessage) -> Self {
        self.push_message(message);
        self
    }

    /// Queue a transport error for `recv`
    pub fn with_error(self, error: ClientError) -> Self {
        self.incoming.lock().unwrap().push_back(Err(error));
        self
    }

    /// Make every `send` fail as if the socket had dropped
    pub fn with_failing_sends(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    pub fn push_message(&self, message: ServerMessage) {
        self.incoming.lock().unwrap().push_back(Ok(message));
    }

    /// Get recorded calls for verification
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Messages passed to `send`, in order
    pub fn sent_messages(&self) -> Vec<ClientMessage> {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter_map(|call| match call {
                MockCall::Send(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(any(test, feature = "mock"))]
#[async_trait]
impl GameTransport for MockTransport {
    async fn send(&mut self, message: &ClientMessage) -> ClientResult<()> {
        self.call_log
            .lock()
            .unwrap()
            .push(MockCall::Send(message.clone()));
        if self.fail_sends {
            return Err(ClientError::ConnectionClosed);
        }
        Ok(())
    }

    async fn recv(&mut self) -> Option<ClientResult<ServerMessage>> {
        self.call_log.lock().unwrap().push(MockCall::Recv);
        self.incoming.lock().unwrap().pop_front()
    }

    async fn close(&mut self) -> ClientResult<()> {
        self.call_log.lock().unwrap().push(MockCall::Close);
        self.incoming.lock().unwrap().clear();
        Ok(())
    }
}
