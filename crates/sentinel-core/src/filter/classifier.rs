use serde::{
    de::{IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer,
};
use serde_json::Value;
use std::fmt;

use super::{denylist::Denylist, errors::Rejection};

/// The only part of a JSON-RPC call the filter looks at.
///
/// Unknown fields are ignored. A missing or `null` method reads as the empty string. Only a JSON
/// object is accepted; an array is never read positionally as a call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RpcCall {
    method: Option<String>,
}

impl<'de> Deserialize<'de> for RpcCall {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RpcCallVisitor)
    }
}

struct RpcCallVisitor;

impl<'de> Visitor<'de> for RpcCallVisitor {
    type Value = RpcCall;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON-RPC call object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RpcCall, A::Error> {
        let mut method = None;

        while let Some(key) = map.next_key::<String>()? {
            if key == "method" {
                method = map.next_value::<Option<String>>()?;
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }

        Ok(RpcCall { method })
    }
}

impl RpcCall {
    #[must_use]
    pub fn method(&self) -> &str {
        self.method.as_deref().unwrap_or_default()
    }
}

/// A request body interpreted as either framing JSON-RPC allows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Single(RpcCall),
    Batch(Vec<RpcCall>),
}

impl Payload {
    /// Parses a request body.
    ///
    /// The bytes are parsed once into a [`Value`] and the typed interpretation is chosen by
    /// shape. Anything that is not a call object is given one more chance as a batch, so the
    /// error returned for a scalar, or for an object with a non-string method, is the batch
    /// interpretation's error.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] describing why the body is neither a call object nor
    /// an array of call objects.
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(body)?;

        if !value.is_array() {
            if let Ok(call) = RpcCall::deserialize(&value) {
                return Ok(Self::Single(call));
            }
        }

        Vec::<RpcCall>::deserialize(&value).map(Self::Batch)
    }

    /// Returns the calls in body order.
    #[must_use]
    pub fn calls(&self) -> &[RpcCall] {
        match self {
            Self::Single(call) => std::slice::from_ref(call),
            Self::Batch(calls) => calls,
        }
    }
}

/// Outcome of classifying one request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Forward the request unchanged.
    Allow,
    /// Answer the client directly; the downstream handler is never called.
    Reject(Rejection),
}

impl Decision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Maps a request body to a [`Decision`] against `denylist`.
///
/// Batches are scanned in order and the first denylisted call decides; later calls are not
/// looked at. The rejection message carries the method as it appeared on the wire.
#[must_use]
pub fn classify(denylist: &Denylist, body: &[u8]) -> Decision {
    let payload = match Payload::parse(body) {
        Ok(payload) => payload,
        Err(e) => return Decision::Reject(Rejection::MalformedPayload(e.to_string())),
    };

    payload
        .calls()
        .iter()
        .map(RpcCall::method)
        .find(|method| denylist.contains(method))
        .map_or(Decision::Allow, |method| {
            Decision::Reject(Rejection::BlockedMethod(method.to_string()))
        })
}
