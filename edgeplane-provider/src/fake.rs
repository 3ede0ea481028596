//! Scripted test doubles for the upstream API traits
//!
//! A `Script` holds the exact list of expected `(operation, request,
//! response)` triples. Each call must match the next expectation; anything
//! else fails the test.

use std::any::Any;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::Mutex;

use crate::client::ClientError;

struct Expected {
    operation: &'static str,
    request: Box<dyn Any + Send>,
    response: Result<Box<dyn Any + Send>, ClientError>,
}

#[derive(Default)]
pub struct Script {
    expected: Mutex<VecDeque<Expected>>,
    calls: Mutex<Vec<&'static str>>,
}

impl Script {
    pub fn expect<Req, Resp>(&self, operation: &'static str, request: Req, response: Resp)
    where
        Req: Send + 'static,
        Resp: Send + 'static,
    {
        self.push(operation, request, Ok(Box::new(response)));
    }

    pub fn expect_error<Req>(&self, operation: &'static str, request: Req, error: ClientError)
    where
        Req: Send + 'static,
    {
        self.push(operation, request, Err(error));
    }

    fn push<Req: Send + 'static>(
        &self,
        operation: &'static str,
        request: Req,
        response: Result<Box<dyn Any + Send>, ClientError>,
    ) {
        self.expected.lock().unwrap().push_back(Expected {
            operation,
            request: Box::new(request),
            response,
        });
    }

    /// Record a call and return the scripted response
    pub fn call<Req, Resp>(&self, operation: &'static str, request: &Req) -> Result<Resp, ClientError>
    where
        Req: PartialEq + Debug + 'static,
        Resp: 'static,
    {
        self.calls.lock().unwrap().push(operation);
        let next = self
            .expected
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected call to {}: {:?}", operation, request));
        assert_eq!(next.operation, operation, "call order");
        let expected = next
            .request
            .downcast::<Req>()
            .unwrap_or_else(|_| panic!("request type mismatch for {}", operation));
        assert_eq!(&*expected, request, "request of {}", operation);
        next.response.map(|response| {
            *response
                .downcast::<Resp>()
                .unwrap_or_else(|_| panic!("response type mismatch for {}", operation))
        })
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// Panic if scripted calls were never made
    pub fn assert_done(&self) {
        let remaining: Vec<_> = self
            .expected
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.operation)
            .collect();
        assert!(remaining.is_empty(), "expected calls not made: {:?}", remaining);
    }
}
