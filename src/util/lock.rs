use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

const POISON_HINT: &str = "post store or response cache state may be stale after a panic";

pub(crate) fn rw_read<'a, T>(
    lock: &'a RwLock<T>,
    target: &'static str,
    op: &'static str,
) -> RwLockReadGuard<'a, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!(
                op,
                target_module = target,
                lock_kind = "rwlock.read",
                result = "poisoned_recovered",
                hint = POISON_HINT,
                "recovered poisoned postboard state lock"
            );
            poisoned.into_inner()
        }
    }
}

pub(crate) fn rw_write<'a, T>(
    lock: &'a RwLock<T>,
    target: &'static str,
    op: &'static str,
) -> RwLockWriteGuard<'a, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!(
                op,
                target_module = target,
                lock_kind = "rwlock.write",
                result = "poisoned_recovered",
                hint = POISON_HINT,
                "recovered poisoned postboard state lock"
            );
            poisoned.into_inner()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("capture buffer").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn poisoned(value: u32) -> RwLock<u32> {
        let lock = RwLock::new(value);
        let _ = catch_unwind(AssertUnwindSafe(|| {
            let _guard = lock.write().expect("lock should be acquired");
            panic!("poison lock");
        }));
        lock
    }

    #[test]
    fn write_recovers_from_poisoned_lock() {
        let lock = poisoned(1);

        *rw_write(&lock, "util::lock", "test") = 2;
        assert_eq!(*rw_read(&lock, "util::lock", "test"), 2);
    }

    #[test]
    fn recovery_warning_names_store_and_cache_state() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer({
                let captured = captured.clone();
                move || captured.clone()
            })
            .finish();
        let lock = poisoned(1);

        tracing::subscriber::with_default(subscriber, || {
            let _guard = rw_read(&lock, "application::store", "read");
        });

        let output = String::from_utf8(captured.0.lock().expect("capture buffer").clone())
            .expect("utf-8 log output");
        assert!(output.contains("recovered poisoned postboard state lock"));
        assert!(output.contains("post store or response cache state"));
        assert!(output.contains("application::store"));
    }
}
