use leptos::prelude::*;

use crate::components::ambient_field::{AmbientFieldCanvas, Theme};

/// One anchored block of the landing page.
#[derive(Clone, Copy, Debug)]
struct Section {
	id: &'static str,
	label: &'static str,
	heading: &'static str,
	blurb: &'static str,
}

/// Page order. The nav links are generated from the same table.
const SECTIONS: [Section; 8] = [
	Section {
		id: "hero",
		label: "Home",
		heading: "Portfolio",
		blurb: "Move the pointer across the page to stir the network.",
	},
	Section {
		id: "about",
		label: "About",
		heading: "About",
		blurb: "Background, interests and what I am looking for next.",
	},
	Section {
		id: "experience",
		label: "Experience",
		heading: "Experience",
		blurb: "Roles and internships, most recent first.",
	},
	Section {
		id: "projects",
		label: "Projects",
		heading: "Projects",
		blurb: "Selected work with links to source and demos.",
	},
	Section {
		id: "skills",
		label: "Skills",
		heading: "Skills",
		blurb: "Languages, frameworks and tools in day-to-day use.",
	},
	Section {
		id: "certifications",
		label: "Certifications",
		heading: "Certifications",
		blurb: "Courses and credentials.",
	},
	Section {
		id: "education",
		label: "Education",
		heading: "Education",
		blurb: "Degrees and coursework.",
	},
	Section {
		id: "contact",
		label: "Contact",
		heading: "Get in touch",
		blurb: "Email or find me on GitHub and LinkedIn.",
	},
];

#[component]
fn PortfolioSection(section: Section) -> impl IntoView {
	let Section { id, heading, blurb, .. } = section;
	if id == "hero" {
		view! {
			<section id=id class="portfolio-section hero">
				<h1>{heading}</h1>
				<p class="subtitle">{blurb}</p>
			</section>
		}
		.into_any()
	} else {
		view! {
			<section id=id class="portfolio-section">
				<h2>{heading}</h2>
				<p>{blurb}</p>
			</section>
		}
		.into_any()
	}
}

/// Portfolio landing page: the ambient field behind the content sections,
/// plus section links and a theme toggle.
#[component]
pub fn Home() -> impl IntoView {
	let (theme, set_theme) = signal(Theme::Dark);

	view! {
		<div class="portfolio" data-theme=move || theme.get().as_str()>
			// A new theme means a new field instance, not a palette swap.
			{move || {
				let theme = theme.get();
				view! { <AmbientFieldCanvas theme=theme /> }
			}}
			<nav class="portfolio-nav">
				<ul>
					{SECTIONS
						.iter()
						.map(|s| view! { <li><a href=format!("#{}", s.id)>{s.label}</a></li> })
						.collect_view()}
				</ul>
				<button
					class="theme-toggle"
					on:click=move |_| set_theme.update(|t| *t = t.toggled())
				>
					{move || match theme.get() {
						Theme::Dark => "Light mode",
						Theme::Light => "Dark mode",
					}}
				</button>
			</nav>
			// The background stays up even if a section fails to render.
			<ErrorBoundary fallback=|errors| {
				view! {
					<main class="portfolio-content">
						<p>"Some of this page failed to load."</p>
						<ul>
							{move || {
								errors
									.get()
									.into_iter()
									.map(|(_, e)| view! { <li>{e.to_string()}</li> })
									.collect_view()
							}}
						</ul>
					</main>
				}
			}>
				<main class="portfolio-content">
					{SECTIONS
						.iter()
						.map(|&section| view! { <PortfolioSection section=section /> })
						.collect_view()}
				</main>
			</ErrorBoundary>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	#[test]
	fn section_ids_are_unique_anchors() {
		let ids: HashSet<_> = SECTIONS.iter().map(|s| s.id).collect();
		assert_eq!(ids.len(), SECTIONS.len());
		for s in SECTIONS {
			assert!(!s.id.is_empty() && !s.id.contains(char::is_whitespace), "{s:?}");
			assert!(!s.label.is_empty(), "{s:?}");
		}
	}

	#[test]
	fn hero_leads_and_contact_closes() {
		assert_eq!(SECTIONS.first().map(|s| s.id), Some("hero"));
		assert_eq!(SECTIONS.last().map(|s| s.id), Some("contact"));
	}
}
