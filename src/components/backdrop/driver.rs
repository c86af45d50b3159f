//! The render frame driver.
//!
//! A one-shot loop: `Idle -> Running -> Stopped`, no way back. Frames are
//! scheduled cooperatively via `requestAnimationFrame`: each callback
//! schedules the next one only after it finishes, so a slow frame lowers
//! the rate instead of queueing work. Stopping cancels the pending
//! callback so nothing fires against a torn-down scene.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

/// Phases of a render loop's life.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopPhase {
	/// Constructed, never started.
	Idle,
	/// Frames are being scheduled.
	Running,
	/// Finished. A stopped driver is never restarted; construct a fresh
	/// one instead.
	Stopped,
}

/// The phase machine, kept separate from the scheduling glue.
#[derive(Clone, Copy, Debug)]
pub struct LoopState {
	phase: LoopPhase,
}

impl LoopState {
	pub fn new() -> Self {
		Self {
			phase: LoopPhase::Idle,
		}
	}

	pub fn phase(&self) -> LoopPhase {
		self.phase
	}

	pub fn is_running(&self) -> bool {
		self.phase == LoopPhase::Running
	}

	/// `Idle -> Running`. Any other phase refuses and stays put.
	pub fn begin(&mut self) -> bool {
		if self.phase == LoopPhase::Idle {
			self.phase = LoopPhase::Running;
			true
		} else {
			false
		}
	}

	/// Moves to `Stopped` from any phase. Returns whether this call did
	/// the stopping; repeated calls are no-ops.
	pub fn halt(&mut self) -> bool {
		if self.phase == LoopPhase::Stopped {
			false
		} else {
			self.phase = LoopPhase::Stopped;
			true
		}
	}
}

impl Default for LoopState {
	fn default() -> Self {
		Self::new()
	}
}

/// Drives a frame callback through `requestAnimationFrame`.
pub struct RenderLoop {
	state: Rc<Cell<LoopState>>,
	frame_id: Rc<Cell<Option<i32>>>,
	callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl RenderLoop {
	pub fn new() -> Self {
		Self {
			state: Rc::new(Cell::new(LoopState::new())),
			frame_id: Rc::new(Cell::new(None)),
			callback: Rc::new(RefCell::new(None)),
		}
	}

	/// Starts scheduling `frame` once per display refresh.
	///
	/// Returns false without scheduling anything if the loop is not
	/// fresh (already running or stopped).
	pub fn start(&self, mut frame: impl FnMut() + 'static) -> bool {
		let mut state = self.state.get();
		if !state.begin() {
			return false;
		}
		self.state.set(state);

		let (state_cell, frame_id, callback_inner) = (
			self.state.clone(),
			self.frame_id.clone(),
			self.callback.clone(),
		);
		*self.callback.borrow_mut() = Some(Closure::new(move || {
			frame_id.set(None);
			if !state_cell.get().is_running() {
				return;
			}
			frame();
			if let Some(cb) = &*callback_inner.borrow() {
				if let Ok(id) = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref())
				{
					frame_id.set(Some(id));
				}
			}
		}));

		if let Some(cb) = &*self.callback.borrow() {
			if let Ok(id) = web_sys::window()
				.unwrap()
				.request_animation_frame(cb.as_ref().unchecked_ref())
			{
				self.frame_id.set(Some(id));
			}
		}
		true
	}

	/// Stops the loop and cancels the pending frame. Idempotent.
	pub fn stop(&self) {
		let mut state = self.state.get();
		if !state.halt() {
			return;
		}
		self.state.set(state);

		if let Some(id) = self.frame_id.take() {
			let _ = web_sys::window().unwrap().cancel_animation_frame(id);
		}
		self.callback.borrow_mut().take();
	}

	pub fn is_running(&self) -> bool {
		self.state.get().is_running()
	}
}

impl Default for RenderLoop {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fresh_state_is_idle() {
		let state = LoopState::new();
		assert_eq!(state.phase(), LoopPhase::Idle);
		assert!(!state.is_running());
	}

	#[test]
	fn begin_runs_exactly_once() {
		let mut state = LoopState::new();
		assert!(state.begin());
		assert_eq!(state.phase(), LoopPhase::Running);
		assert!(!state.begin());
		assert_eq!(state.phase(), LoopPhase::Running);
	}

	#[test]
	fn halt_is_idempotent() {
		let mut state = LoopState::new();
		state.begin();

		assert!(state.halt());
		let after_first = state.phase();

		assert!(!state.halt());
		assert_eq!(state.phase(), after_first);
		assert_eq!(state.phase(), LoopPhase::Stopped);
	}

	#[test]
	fn no_restart_after_stopping() {
		let mut state = LoopState::new();
		state.begin();
		state.halt();
		assert!(!state.begin());
		assert_eq!(state.phase(), LoopPhase::Stopped);
	}

	#[test]
	fn halting_an_idle_loop_prevents_a_later_start() {
		let mut state = LoopState::new();
		assert!(state.halt());
		assert!(!state.begin());
		assert_eq!(state.phase(), LoopPhase::Stopped);
	}
}
