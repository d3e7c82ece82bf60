//! Blocking bridge from the synchronous collaborator traits to async HTTP.

use std::future::Future;

use tokio::runtime::{Builder, Handle, Runtime, RuntimeFlavor};

use crate::ProviderBuildError;

/// Owned Tokio runtime used when the caller is not already inside one.
///
/// When called from within a multi-threaded runtime the caller's handle is
/// used with [`tokio::task::block_in_place`]. Outside any runtime the owned
/// runtime drives the future. Calls from a `current_thread` runtime panic.
/// The owned runtime is multi-threaded because venue menus are fetched from
/// several threads at once.
pub(crate) struct BlockingRuntime {
    runtime: Runtime,
}

impl std::fmt::Debug for BlockingRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingRuntime")
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl BlockingRuntime {
    pub(crate) fn new() -> Result<Self, ProviderBuildError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("mealcast-http")
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self { runtime })
    }

    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
