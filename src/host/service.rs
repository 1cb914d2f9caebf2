//! The hosted service seam

use super::settings::HostSettings;

/// A service the host starts and stops. Returning `false` reports failure.
pub trait ServiceControl {
    fn start(&mut self) -> bool;
    fn stop(&mut self) -> bool;
}

/// Creates the service once the final settings are known.
pub type ServiceFactory = Box<dyn Fn(&HostSettings) -> Box<dyn ServiceControl>>;

/// A service built from a pair of closures.
pub struct DelegateService<S, T> {
    on_start: S,
    on_stop: T,
}

impl<S, T> DelegateService<S, T>
where
    S: FnMut() -> bool,
    T: FnMut() -> bool,
{
    pub fn new(on_start: S, on_stop: T) -> Self {
        DelegateService { on_start, on_stop }
    }
}

impl<S, T> ServiceControl for DelegateService<S, T>
where
    S: FnMut() -> bool,
    T: FnMut() -> bool,
{
    fn start(&mut self) -> bool {
        (self.on_start)()
    }

    fn stop(&mut self) -> bool {
        (self.on_stop)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_delegate_service_calls_closures() {
        let started = Rc::new(Cell::new(0));
        let counter = started.clone();
        let mut service = DelegateService::new(
            move || {
                counter.set(counter.get() + 1);
                true
            },
            || false,
        );

        assert!(service.start());
        assert!(!service.stop());
        assert_eq!(started.get(), 1);
    }
}
