//! An optional process-wide engine instance.
//!
//! Nothing in this crate reads the shared instance on its own; applications that want one
//! install it explicitly and tear it down before exit.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;

use crate::error::{Error, Result};
use crate::instance::Instance;

static SHARED: Mutex<Option<Instance>> = Mutex::new(None);

fn shared() -> MutexGuard<'static, Option<Instance>> {
    SHARED.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Installs `instance` as the shared instance.
///
/// Fails if one is installed already; the installed instance is kept.
pub fn install(instance: Instance) -> Result<()> {
    let mut shared = shared();
    if shared.is_some() {
        return Err(Error::SharedInstanceInstalled);
    }
    debug!("installing the shared engine instance");
    *shared = Some(instance);
    Ok(())
}

/// Returns the shared instance, if installed.
pub fn instance() -> Option<Instance> {
    shared().clone()
}

/// Uninstalls and returns the shared instance.
///
/// The engine is released once the returned value and every other clone are dropped.
pub fn teardown() -> Option<Instance> {
    let instance = shared().take();
    if instance.is_some() {
        debug!("uninstalled the shared engine instance");
    }
    instance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::Configuration;
    use crate::mock;

    // One test, since the registry is process-wide.
    #[test]
    fn test_install_and_teardown() {
        assert!(instance().is_none());

        let first = Instance::new(mock::api(), &Configuration::default()).unwrap();
        let journal = mock::journal(&first);
        let id = mock::id(&first);
        install(first.clone()).unwrap();
        assert_eq!(instance().as_ref(), Some(&first));

        let second = Instance::new(mock::api(), &Configuration::default()).unwrap();
        assert!(matches!(
            install(second),
            Err(Error::SharedInstanceInstalled)
        ));
        assert_eq!(instance().as_ref(), Some(&first));

        drop(first);
        let torn_down = teardown().unwrap();
        assert!(instance().is_none());
        assert!(teardown().is_none());

        assert!(!journal.is_freed(id));
        drop(torn_down);
        assert!(journal.is_freed(id));
    }
}
