//! Scene-scoped registry of live input providers and the aggregation over them.
//!
//! An [`InputSession`] is opened when a scene starts and closed (or dropped)
//! when it ends. Providers are registered into it explicitly and may be removed
//! one by one; nothing is global. Every frame, consumers ask the session for
//! the combined value of a control with [`InputSession::combined`].
//!
//! ```text
//! touch / tilt / gamepad ──► providers ──► InputSession::combined ──► VehicleInputHandler
//! ```
//!
//! All access happens on the frame-update thread, so the session takes
//! `&mut self` for mutation and needs no locking.

use super::combine::Combine;
use super::provider::{Capability, CapabilityKind, InputProvider};
use std::fmt::{self, Display};
use tracing::{debug, info, warn};

/// Identifier handed out on registration. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProviderId(u64);

impl Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Entry {
    id: ProviderId,
    capabilities: &'static [CapabilityKind],
    provider: Box<dyn InputProvider>,
}

impl Entry {
    fn provides(&self, kind: CapabilityKind) -> bool {
        self.capabilities.contains(&kind)
    }
}

pub struct InputSession {
    name: String,
    entries: Vec<Entry>,
    next_id: u64,
}

impl InputSession {
    pub fn open(name: impl Into<String>) -> Self {
        let name = name.into();
        info!("Opening input session '{}'", name);
        Self {
            name,
            entries: Vec::new(),
            next_id: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a provider at the end of the registration order.
    ///
    /// The provider's capabilities are captured here; aggregation filters on
    /// this recorded set. Registering the same kind of provider twice yields
    /// two independent entries.
    pub fn register(&mut self, provider: Box<dyn InputProvider>) -> ProviderId {
        let id = ProviderId(self.next_id);
        self.next_id += 1;

        let capabilities = provider.capabilities();
        debug!(
            "Registered provider '{}' as {} with capabilities {:?}",
            provider.name(),
            id,
            capabilities
        );

        self.entries.push(Entry {
            id,
            capabilities,
            provider,
        });
        id
    }

    /// Removes exactly one provider and hands it back.
    pub fn deregister(&mut self, id: ProviderId) -> Option<Box<dyn InputProvider>> {
        match self.entries.iter().position(|entry| entry.id == id) {
            Some(index) => {
                let entry = self.entries.remove(index);
                debug!("Deregistered provider '{}' ({})", entry.provider.name(), id);
                Some(entry.provider)
            }
            None => {
                warn!("Tried to deregister unknown provider {} in session '{}'", id, self.name);
                None
            }
        }
    }

    /// Drops every registered provider. Idempotent.
    pub fn reset(&mut self) {
        if !self.entries.is_empty() {
            debug!(
                "Resetting session '{}', dropping {} providers",
                self.name,
                self.entries.len()
            );
        }
        self.entries.clear();
    }

    /// Ends the scene. Equivalent to dropping the session, but logs what was still live.
    pub fn close(self) {
        info!(
            "Closing input session '{}' with {} providers still registered",
            self.name,
            self.entries.len()
        );
    }

    /// Providers in registration order. Call again to restart.
    pub fn all(&self) -> impl Iterator<Item = (ProviderId, &dyn InputProvider)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.id, entry.provider.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: ProviderId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Typed mutable access, used by device code to write raw input into a provider.
    pub fn provider_mut<P: InputProvider>(&mut self, id: ProviderId) -> Option<&mut P> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)?
            .provider
            .as_any_mut()
            .downcast_mut::<P>()
    }

    pub fn provider<P: InputProvider>(&self, id: ProviderId) -> Option<&P> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)?
            .provider
            .as_any()
            .downcast_ref::<P>()
    }

    /// Combined value of one control over every provider declaring capability `C`.
    ///
    /// Providers without `C` are skipped. Values are folded with `V`'s
    /// [`Combine`] rule in registration order, stopping early once the result
    /// can no longer change. With no matching provider the fold identity is
    /// returned; that is the normal state when a scene has no such input.
    pub fn combined<C, V>(&self, selector: impl Fn(&C::Provider) -> V) -> V
    where
        C: Capability,
        V: Combine,
    {
        let mut acc = V::IDENTITY;
        for entry in self.entries.iter().filter(|entry| entry.provides(C::KIND)) {
            let Some(view) = C::view(entry.provider.as_ref()) else {
                warn!(
                    "Provider '{}' ({}) declares {} but exposes no {} view",
                    entry.provider.name(),
                    entry.id,
                    C::KIND,
                    C::KIND
                );
                continue;
            };

            acc = acc.combine(selector(view));
            if acc.is_saturated() {
                break;
            }
        }
        acc
    }

    /// Closes the frame for every provider, clearing click edges.
    pub fn end_frame(&mut self) {
        for entry in &mut self.entries {
            entry.provider.end_frame();
        }
    }
}

impl fmt::Debug for InputSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputSession")
            .field("name", &self.name)
            .field(
                "providers",
                &self
                    .entries
                    .iter()
                    .map(|entry| (entry.id, entry.provider.name()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
