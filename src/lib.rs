//! lumen-folio: a single-page portfolio with animated particle backdrops.
//!
//! The page is static content; the moving part is one parameterized
//! particle engine (see [`components::backdrop`]) mounted behind each
//! section with a different preset. Site text is loaded from a JSON
//! element in the host document so the WASM build carries no copy.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;
pub mod contact;
pub mod content;

pub use components::backdrop::{BackdropConfig, BackdropPalette, ParticleBackdrop};
use components::sections::{
	AboutSection, ContactSection, HeroSection, ProjectsSection, SkillsSection,
};
use content::SiteContent;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("lumen-folio: logging initialized");
}

/// Main application component.
/// Loads site content from the DOM and composes the page sections.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let site = content::load_site_content().unwrap_or_default();
	provide_context::<SiteContent>(site.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text=format!("{} | {}", site.name, site.tagline) />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main>
			<HeroSection />
			<AboutSection />
			<SkillsSection />
			<ProjectsSection />
			<ContactSection />
		</main>
	}
}
