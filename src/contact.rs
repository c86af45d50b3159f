//! Contact form boundary.
//!
//! Client-side validation and a simulated submission: there is no mail
//! integration behind this, the handler validates, logs, and reports an
//! outcome. The animated backdrop that shares the section has no data
//! dependency on any of this.

use log::info;

/// A visitor's message, as collected by the contact form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactMessage {
	pub name: String,
	pub email: String,
	pub message: String,
}

/// Per-field validation messages; `None` means the field is fine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldErrors {
	pub name: Option<String>,
	pub email: Option<String>,
	pub message: Option<String>,
}

impl FieldErrors {
	pub fn is_empty(&self) -> bool {
		self.name.is_none() && self.email.is_none() && self.message.is_none()
	}
}

/// What the form shows after a submission attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmissionOutcome {
	pub success: bool,
	pub message: String,
	pub errors: Option<FieldErrors>,
}

/// Validates a draft message against the form's rules.
pub fn validate(message: &ContactMessage) -> FieldErrors {
	let mut errors = FieldErrors::default();
	if message.name.trim().chars().count() < 2 {
		errors.name = Some("Name must be at least 2 characters.".into());
	}
	if !looks_like_email(message.email.trim()) {
		errors.email = Some("Please enter a valid email address.".into());
	}
	if message.message.trim().chars().count() < 10 {
		errors.message = Some("Message must be at least 10 characters long.".into());
	}
	errors
}

/// Good-enough address shape check: one `@` with a dotted domain and no
/// whitespace. Deliverability is not this form's problem.
fn looks_like_email(s: &str) -> bool {
	if s.contains(char::is_whitespace) {
		return false;
	}
	let Some((local, domain)) = s.split_once('@') else {
		return false;
	};
	if local.is_empty() || domain.contains('@') {
		return false;
	}
	match domain.rsplit_once('.') {
		Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
		None => false,
	}
}

/// Handles a submission: validate, log, report.
pub fn submit(message: &ContactMessage) -> SubmissionOutcome {
	let errors = validate(message);
	if !errors.is_empty() {
		return SubmissionOutcome {
			success: false,
			message: "Please correct the errors and try again.".into(),
			errors: Some(errors),
		};
	}

	// A mail service integration would go here; the portfolio build
	// only records the attempt.
	info!(
		"contact: message from {} <{}> ({} chars)",
		message.name.trim(),
		message.email.trim(),
		message.message.trim().chars().count()
	);

	SubmissionOutcome {
		success: true,
		message: "Thank you for your message! I'll get back to you soon.".into(),
		errors: None,
	}
}
