//! Scoped resource lifetime for a mounted backdrop.
//!
//! Everything a backdrop acquires (listeners, the render loop, the
//! context binding) registers its release in a [`Teardown`] as it is
//! acquired. Release then happens exactly once on every exit path:
//! explicit detach, scope drop, or an error partway through setup.

use thiserror::Error;

use super::config::ConfigError;

/// Why a backdrop failed to attach to its surface.
///
/// All of these occur before any frame is scheduled; whatever was
/// acquired up to the failure point is released before the error is
/// returned.
#[derive(Debug, Error)]
pub enum AttachError {
	/// The configuration was rejected, before any acquisition.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The surface has no drawable area.
	#[error("display surface has no drawable area")]
	SurfaceUnavailable,
	/// The canvas refused to hand out a 2d context.
	#[error("2d canvas context unavailable: {0}")]
	ContextUnavailable(String),
}

/// A stack of cleanup actions, run in reverse acquisition order.
#[derive(Default)]
pub struct Teardown {
	actions: Vec<Box<dyn FnOnce()>>,
}

impl Teardown {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a cleanup action. Later pushes run first.
	pub fn push(&mut self, action: impl FnOnce() + 'static) {
		self.actions.push(Box::new(action));
	}

	/// Number of cleanup actions still pending.
	pub fn pending(&self) -> usize {
		self.actions.len()
	}

	/// Runs all pending actions, newest first. Safe to call repeatedly;
	/// each action runs at most once.
	pub fn run(&mut self) {
		while let Some(action) = self.actions.pop() {
			action();
		}
	}
}

impl Drop for Teardown {
	fn drop(&mut self) {
		self.run();
	}
}

/// A mounted backdrop. Construction is attach; disposal is detach.
///
/// Dropping the handle is equivalent to calling [`detach`]; the explicit
/// method exists so call sites can say what they mean.
///
/// [`detach`]: BackdropHandle::detach
pub struct BackdropHandle {
	teardown: Teardown,
}

impl BackdropHandle {
	pub(crate) fn new(teardown: Teardown) -> Self {
		Self { teardown }
	}

	/// Stops the render loop, unregisters every listener, and unbinds
	/// the context, in reverse acquisition order.
	pub fn detach(mut self) {
		self.teardown.run();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::RefCell;
	use std::rc::Rc;

	fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn FnOnce()>) {
		let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
		let log_for_make = log.clone();
		let make = move |name: &'static str| -> Box<dyn FnOnce()> {
			let log = log_for_make.clone();
			Box::new(move || log.borrow_mut().push(name))
		};
		(log, make)
	}

	#[test]
	fn runs_in_reverse_acquisition_order() {
		let (log, make) = recorder();
		let mut teardown = Teardown::new();
		teardown.push(make("context"));
		teardown.push(make("listeners"));
		teardown.push(make("loop"));

		teardown.run();
		assert_eq!(*log.borrow(), vec!["loop", "listeners", "context"]);
		assert_eq!(teardown.pending(), 0);
	}

	#[test]
	fn running_twice_releases_once() {
		let (log, make) = recorder();
		let mut teardown = Teardown::new();
		teardown.push(make("context"));

		teardown.run();
		teardown.run();
		assert_eq!(log.borrow().len(), 1);
	}

	#[test]
	fn dropping_releases_pending_actions() {
		let (log, make) = recorder();
		{
			let mut teardown = Teardown::new();
			teardown.push(make("context"));
			teardown.push(make("listeners"));
			teardown.run();
			teardown.push(make("late"));
			// Falls out of scope with one action still pending.
		}
		assert_eq!(*log.borrow(), vec!["listeners", "context", "late"]);
	}

	#[test]
	fn partial_setup_failure_leaks_nothing() {
		let (log, make) = recorder();

		// Setup that fails after two of three acquisitions.
		let result: Result<BackdropHandle, AttachError> = (|| {
			let mut teardown = Teardown::new();
			teardown.push(make("context"));
			teardown.push(make("listener"));
			Err(AttachError::SurfaceUnavailable)
			// `teardown` drops here, releasing both.
		})();

		assert!(result.is_err());
		assert_eq!(*log.borrow(), vec!["listener", "context"]);
	}

	#[test]
	fn detach_runs_the_teardown() {
		let (log, make) = recorder();
		let mut teardown = Teardown::new();
		teardown.push(make("everything"));

		let handle = BackdropHandle::new(teardown);
		handle.detach();
		assert_eq!(*log.borrow(), vec!["everything"]);
	}

	#[test]
	fn config_errors_convert_into_attach_errors() {
		let err: AttachError = ConfigError::ParticleCount.into();
		assert!(matches!(err, AttachError::Config(ConfigError::ParticleCount)));
	}
}
