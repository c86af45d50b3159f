//! Page sections.
//!
//! Each section is a full-bleed container with a [`ParticleBackdrop`]
//! preset underneath and the real content overlaid. Sections read their
//! text from the [`SiteContent`] context provided by the app root.

use std::time::Duration;

use leptos::prelude::*;

use super::backdrop::{BackdropConfig, ParticleBackdrop};
use crate::contact::{self, ContactMessage, SubmissionOutcome};
use crate::content::SiteContent;

/// Landing section: name, tagline, drifting dots.
#[component]
pub fn HeroSection() -> impl IntoView {
	let content = expect_context::<SiteContent>();

	view! {
		<section id="home" class="section section-hero">
			<ParticleBackdrop config=BackdropConfig::drift() />
			<div class="section-content">
				<h1>{content.name.clone()}</h1>
				<p class="tagline">{content.tagline.clone()}</p>
				<a class="cta" href="#projects">
					"View my work"
				</a>
			</div>
		</section>
	}
}

/// About text plus the experience/education timeline, over the linked
/// constellation field.
#[component]
pub fn AboutSection() -> impl IntoView {
	let content = expect_context::<SiteContent>();

	view! {
		<section id="about" class="section section-about">
			<ParticleBackdrop config=BackdropConfig::constellation() />
			<div class="section-content">
				<h2>"About"</h2>
				<p>{content.about.clone()}</p>
				<div class="timeline">
					{content
						.timeline
						.iter()
						.map(|item| {
							view! {
								<div class="timeline-item">
									<p class="timeline-date">{item.date.clone()}</p>
									<h3>{item.title.clone()}</h3>
									<p class="timeline-institution">{item.institution.clone()}</p>
									<p>{item.description.clone()}</p>
								</div>
							}
						})
						.collect_view()}
				</div>
			</div>
		</section>
	}
}

/// Skill list over drifting dots.
#[component]
pub fn SkillsSection() -> impl IntoView {
	let content = expect_context::<SiteContent>();

	view! {
		<section id="skills" class="section section-skills">
			<ParticleBackdrop config=BackdropConfig::drift() />
			<div class="section-content">
				<h2>"Skills"</h2>
				<ul class="skill-list">
					{content
						.skills
						.iter()
						.map(|skill| view! { <li>{skill.clone()}</li> })
						.collect_view()}
				</ul>
			</div>
		</section>
	}
}

/// Project cards over the pointer-attracted nebula.
#[component]
pub fn ProjectsSection() -> impl IntoView {
	let content = expect_context::<SiteContent>();

	view! {
		<section id="projects" class="section section-projects">
			<ParticleBackdrop config=BackdropConfig::nebula() />
			<div class="section-content">
				<h2>"Projects"</h2>
				<div class="project-grid">
					{content
						.projects
						.iter()
						.map(|project| {
							let link = project.url.clone();
							view! {
								<div class="project-card">
									<h3>{project.name.clone()}</h3>
									<p>{project.description.clone()}</p>
									<ul class="tag-list">
										{project
											.tags
											.iter()
											.map(|tag| view! { <li>{tag.clone()}</li> })
											.collect_view()}
									</ul>
									{link
										.map(|url| {
											view! {
												<a href=url target="_blank" rel="noopener noreferrer">
													"Visit"
												</a>
											}
										})}
								</div>
							}
						})
						.collect_view()}
				</div>
			</div>
		</section>
	}
}

/// Contact details and the message form, over the ember field.
///
/// Submission is simulated: validation happens immediately, the outcome
/// appears after a short artificial delay, and nothing leaves the page.
#[component]
pub fn ContactSection() -> impl IntoView {
	let content = expect_context::<SiteContent>();

	let name = RwSignal::new(String::new());
	let email = RwSignal::new(String::new());
	let message = RwSignal::new(String::new());
	let pending = RwSignal::new(false);
	let outcome: RwSignal<Option<SubmissionOutcome>> = RwSignal::new(None);

	let field_errors = move || {
		outcome
			.get()
			.and_then(|o| o.errors)
			.unwrap_or_default()
	};

	let on_submit = move |ev: leptos::ev::SubmitEvent| {
		ev.prevent_default();
		if pending.get_untracked() {
			return;
		}

		let draft = ContactMessage {
			name: name.get_untracked(),
			email: email.get_untracked(),
			message: message.get_untracked(),
		};

		// Reject invalid drafts immediately; only plausible ones get the
		// simulated round trip.
		let errors = contact::validate(&draft);
		if !errors.is_empty() {
			outcome.set(Some(SubmissionOutcome {
				success: false,
				message: "Please correct the errors and try again.".into(),
				errors: Some(errors),
			}));
			return;
		}

		pending.set(true);
		outcome.set(None);
		set_timeout(
			move || {
				let result = contact::submit(&draft);
				if result.success {
					name.set(String::new());
					email.set(String::new());
					message.set(String::new());
				}
				outcome.set(Some(result));
				pending.set(false);
			},
			Duration::from_millis(1000),
		);
	};

	view! {
		<section id="contact" class="section section-contact">
			<ParticleBackdrop config=BackdropConfig::embers() />
			<div class="section-content">
				<h2>"Get in touch"</h2>
				<p>{format!("{} · {}", content.email, content.location)}</p>
				<form on:submit=on_submit>
					<label for="contact-name">"Name"</label>
					<input
						id="contact-name"
						name="name"
						prop:value=name
						on:input=move |ev| name.set(event_target_value(&ev))
					/>
					{move || {
						field_errors().name.map(|e| view! { <p class="field-error">{e}</p> })
					}}

					<label for="contact-email">"Email"</label>
					<input
						id="contact-email"
						name="email"
						type="email"
						prop:value=email
						on:input=move |ev| email.set(event_target_value(&ev))
					/>
					{move || {
						field_errors().email.map(|e| view! { <p class="field-error">{e}</p> })
					}}

					<label for="contact-message">"Message"</label>
					<textarea
						id="contact-message"
						name="message"
						rows="5"
						prop:value=message
						on:input=move |ev| message.set(event_target_value(&ev))
					></textarea>
					{move || {
						field_errors().message.map(|e| view! { <p class="field-error">{e}</p> })
					}}

					<button type="submit" disabled=move || pending.get()>
						{move || if pending.get() { "Sending..." } else { "Send message" }}
					</button>
				</form>
				{move || {
					outcome
						.get()
						.map(|o| {
							let class = if o.success { "form-status ok" } else { "form-status err" };
							view! { <p class=class>{o.message}</p> }
						})
				}}
			</div>
		</section>
	}
}
