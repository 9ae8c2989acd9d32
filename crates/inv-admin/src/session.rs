use std::time::Duration;

use inv_client::InventoryApi;

use crate::message::{Banner, MessageKind};

/// What every page owns: its API handle and its status banner.
///
/// There is no global state; two pages never share a banner or a collection.
#[derive(Debug)]
pub struct PageSession<A> {
    api: A,
    banner: Banner,
}

impl<A: InventoryApi> PageSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            banner: Banner::default(),
        }
    }

    pub fn with_success_ttl(api: A, success_ttl: Duration) -> Self {
        Self {
            api,
            banner: Banner::new(success_ttl),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    pub fn banner_mut(&mut self) -> &mut Banner {
        &mut self.banner
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.banner.show(MessageKind::Info, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.banner.show(MessageKind::Success, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.banner.show(MessageKind::Error, text);
    }
}
