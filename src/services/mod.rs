//! Hook service registry.
//!
//! A hook service is one webhook provider. Each variant of [`HookService`]
//! knows how to normalize its provider's payloads, whether its links can be
//! shortened, how to describe itself, and which configuration it accepts. The
//! [`Registry`] resolves services by their stable [`ServiceId`] and composes
//! normalization with formatting for an inbound request.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::message::{Lines, Palette, render};
use crate::shortener::{GitIoShortener, LinkShortener, Passthrough};
use crate::types::{Event, HookConfig, RawPayload, ServiceId};
use crate::webhooks;

pub mod schema;

pub use schema::{ConfigField, FieldKind, PUSH_HOOK_FIELDS};

/// No service is registered under the requested id.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown hook service id {0}")]
pub struct UnknownService(pub ServiceId);

/// What to do with the link on a summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPolicy {
    /// Send it through the registry's shortener.
    Shorten,
    /// Use it as the provider sent it.
    Verbatim,
}

/// A supported webhook provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HookService {
    Github,
    Gitea,
}

impl HookService {
    /// Every supported service.
    pub const ALL: [HookService; 2] = [HookService::Github, HookService::Gitea];

    /// The stable identifier stored on hook records.
    pub fn id(self) -> ServiceId {
        match self {
            HookService::Github => ServiceId(10),
            HookService::Gitea => ServiceId(30),
        }
    }

    pub fn from_id(id: ServiceId) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            HookService::Github => "Github",
            HookService::Gitea => "Gitea",
        }
    }

    /// Setup instructions shown next to the hook.
    pub fn describe(self) -> &'static str {
        match self {
            HookService::Github => {
                "Add the hook URL as a webhook in your GitHub repository settings \
                 (Settings > Webhooks), with content type \
                 application/x-www-form-urlencoded and the \"push\" event selected."
            }
            HookService::Gitea => {
                "Add the hook URL as a Gitea webhook in your repository settings \
                 (Settings > Webhooks > Add Webhook > Gitea), with POST content type \
                 application/x-www-form-urlencoded and push events enabled."
            }
        }
    }

    pub fn config_schema(self) -> &'static [ConfigField] {
        match self {
            HookService::Github | HookService::Gitea => PUSH_HOOK_FIELDS,
        }
    }

    pub fn normalize(self, raw: RawPayload) -> Event {
        match self {
            HookService::Github => webhooks::github::normalize(raw),
            HookService::Gitea => webhooks::gitea::normalize(raw),
        }
    }

    /// The git.io service only shortens GitHub URLs.
    pub fn link_policy(self) -> LinkPolicy {
        match self {
            HookService::Github => LinkPolicy::Shorten,
            HookService::Gitea => LinkPolicy::Verbatim,
        }
    }

    pub fn descriptor(self) -> ServiceDescriptor {
        ServiceDescriptor {
            id: self.id(),
            name: self.name(),
            description: self.describe(),
            config_schema: self.config_schema(),
        }
    }
}

/// A service as presented to the external form renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    pub id: ServiceId,
    pub name: &'static str,
    pub description: &'static str,
    pub config_schema: &'static [ConfigField],
}

/// Resolves services and handles their requests.
#[derive(Debug, Clone)]
pub struct Registry<S = GitIoShortener> {
    services: Vec<HookService>,
    shortener: S,
    palette: Palette,
}

impl<S> Registry<S> {
    /// A registry with every supported service and the default palette.
    pub fn new(shortener: S) -> Self {
        Registry {
            services: HookService::ALL.to_vec(),
            shortener,
            palette: Palette::DEFAULT,
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Restricts the registry to the given services.
    pub fn with_services(mut self, services: impl IntoIterator<Item = HookService>) -> Self {
        self.services = services.into_iter().collect();
        self
    }

    pub fn services(&self) -> &[HookService] {
        &self.services
    }

    pub fn resolve(&self, id: ServiceId) -> Result<HookService, UnknownService> {
        self.services
            .iter()
            .copied()
            .find(|s| s.id() == id)
            .ok_or(UnknownService(id))
    }

    pub fn descriptors(&self) -> Vec<ServiceDescriptor> {
        self.services.iter().map(|s| s.descriptor()).collect()
    }
}

impl<S: LinkShortener + Sync> Registry<S> {
    /// Turns a raw request body into formatted lines.
    ///
    /// An absent, blank, or unparseable body yields no lines: webhook senders
    /// cannot act on an error, so bad input is ignored rather than rejected.
    /// Only an unknown service id is an error.
    pub async fn handle_request(
        &self,
        service_id: ServiceId,
        raw_body: Option<&str>,
        config: &HookConfig,
    ) -> Result<Lines, UnknownService> {
        let service = self.resolve(service_id)?;

        let Some(body) = raw_body.filter(|b| !b.trim().is_empty()) else {
            debug!(service = service.name(), "No payload, nothing to do");
            return Ok(Lines::empty());
        };

        let raw: RawPayload = match serde_json::from_str(body) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(service = service.name(), error = %e, "Ignoring unparseable payload");
                return Ok(Lines::empty());
            }
        };

        let event = service.normalize(raw);
        let lines = match service.link_policy() {
            LinkPolicy::Shorten => render(event, config, self.palette, &self.shortener).await,
            LinkPolicy::Verbatim => render(event, config, self.palette, &Passthrough).await,
        };

        debug!(
            service = service.name(),
            summary = ?lines.summary(),
            lines = lines.len(),
            "Formatted payload"
        );
        Ok(lines)
    }
}
