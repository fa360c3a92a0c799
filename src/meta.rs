//! Per-member route metadata.
//!
//! A [`Controller`](crate::Controller) collects declarative intent — verb,
//! path, middleware chain, required body fields — per handler member while
//! the group is being described, and the registration driver reads it back
//! when the group is installed. One [`RouteMeta`] record per member name;
//! absent reads simply yield "not set".

use crate::method::Method;
use crate::middleware::BoxedMiddleware;

/// Everything a member has declared about itself.
///
/// The verb+path slot holds at most one pair (a later verb annotation
/// overwrites an earlier one). Middlewares accumulate in application order.
/// The body-field list is replaced wholesale on every write — last applied
/// wins — and each name is lowercased on the way in.
#[derive(Default)]
pub(crate) struct RouteMeta {
    pub(crate) verb: Option<Method>,
    pub(crate) path: Option<String>,
    pub(crate) middlewares: Vec<BoxedMiddleware>,
    pub(crate) body_fields: Vec<String>,
}

impl RouteMeta {
    pub(crate) fn set_route(&mut self, verb: Method, path: &str) {
        self.verb = Some(verb);
        self.path = Some(path.to_owned());
    }

    pub(crate) fn push_middleware(&mut self, middleware: BoxedMiddleware) {
        self.middlewares.push(middleware);
    }

    pub(crate) fn set_body_fields<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.body_fields = fields
            .into_iter()
            .map(|f| f.as_ref().to_lowercase())
            .collect();
    }
}

/// Member-name → [`RouteMeta`], in first-touch order.
///
/// Members of one controller keep fully independent metadata; the vec keeps
/// declaration order deterministic for registration.
#[derive(Default)]
pub(crate) struct MetaStore {
    entries: Vec<(&'static str, RouteMeta)>,
}

impl MetaStore {
    /// Returns the member's record, creating an empty one on first touch.
    pub(crate) fn entry(&mut self, member: &'static str) -> &mut RouteMeta {
        let index = match self.entries.iter().position(|(name, _)| *name == member) {
            Some(i) => i,
            None => {
                self.entries.push((member, RouteMeta::default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    pub(crate) fn get(&self, member: &str) -> Option<&RouteMeta> {
        self.entries
            .iter()
            .find(|(name, _)| *name == member)
            .map(|(_, meta)| meta)
    }
}
