//! Static site content.
//!
//! The page text lives in a JSON document embedded in the host HTML
//! (`<script type="application/json" id="site-content">`), so copy edits
//! never touch the WASM build. A built-in default keeps the page whole
//! when the element is missing or malformed.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

/// One entry of the experience/education timeline.
#[derive(Clone, Debug, Deserialize)]
pub struct TimelineItem {
	pub date: String,
	pub title: String,
	pub institution: String,
	pub description: String,
}

/// A showcased project.
#[derive(Clone, Debug, Deserialize)]
pub struct Project {
	pub name: String,
	pub description: String,
	#[serde(default)]
	pub tags: Vec<String>,
	pub url: Option<String>,
}

/// Everything the sections render.
#[derive(Clone, Debug, Deserialize)]
pub struct SiteContent {
	pub name: String,
	pub tagline: String,
	pub about: String,
	#[serde(default)]
	pub skills: Vec<String>,
	#[serde(default)]
	pub timeline: Vec<TimelineItem>,
	#[serde(default)]
	pub projects: Vec<Project>,
	pub email: String,
	pub location: String,
}

impl Default for SiteContent {
	fn default() -> Self {
		Self {
			name: "Robin Vane".into(),
			tagline: "Full Stack Developer".into(),
			about: "I build dynamic, user-friendly web applications from \
				concept to deployment, and I am always exploring new \
				technologies to improve my craft."
				.into(),
			skills: [
				"Rust",
				"TypeScript",
				"React",
				"Leptos",
				"Node.js",
				"PostgreSQL",
				"WebAssembly",
				"Tailwind CSS",
			]
			.map(String::from)
			.to_vec(),
			timeline: vec![
				TimelineItem {
					date: "2023 - Present".into(),
					title: "Full Stack Developer".into(),
					institution: "Freelance".into(),
					description: "Building and maintaining web applications \
						for a range of clients, with a focus on performance \
						and user experience."
						.into(),
				},
				TimelineItem {
					date: "2019 - 2023".into(),
					title: "B.Sc. Computer Science".into(),
					institution: "State Technical University".into(),
					description: "Graduated with a foundation in algorithms, \
						systems, and software engineering."
						.into(),
				},
			],
			projects: vec![
				Project {
					name: "This site".into(),
					description: "A WASM portfolio whose backgrounds are one \
						parameterized particle engine."
						.into(),
					tags: ["Rust", "Leptos", "Canvas"].map(String::from).to_vec(),
					url: None,
				},
			],
			email: "hello@example.dev".into(),
			location: "Remote".into(),
		}
	}
}

/// Load site content from a script element with id="site-content".
/// Expected format: the [`SiteContent`] JSON shape.
pub fn load_site_content() -> Option<SiteContent> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("site-content")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<SiteContent>(&json_text) {
		Ok(content) => {
			info!(
				"content: loaded {} skills, {} timeline entries, {} projects",
				content.skills.len(),
				content.timeline.len(),
				content.projects.len()
			);
			Some(content)
		}
		Err(e) => {
			warn!("content: failed to parse site content: {}", e);
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_the_embedded_json_shape() {
		let json = r#"{
			"name": "A",
			"tagline": "B",
			"about": "C",
			"skills": ["Rust"],
			"timeline": [{
				"date": "2024",
				"title": "T",
				"institution": "I",
				"description": "D"
			}],
			"projects": [{"name": "P", "description": "Q"}],
			"email": "a@b.dev",
			"location": "L"
		}"#;
		let content: SiteContent = serde_json::from_str(json).unwrap();
		assert_eq!(content.skills, vec!["Rust".to_string()]);
		assert_eq!(content.timeline.len(), 1);
		// Omitted optional fields default.
		assert!(content.projects[0].tags.is_empty());
		assert!(content.projects[0].url.is_none());
	}

	#[test]
	fn default_content_fills_every_section() {
		let content = SiteContent::default();
		assert!(!content.name.is_empty());
		assert!(!content.skills.is_empty());
		assert!(!content.timeline.is_empty());
		assert!(!content.projects.is_empty());
	}
}
