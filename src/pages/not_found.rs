use leptos::prelude::*;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"Nothing planned here"</h1>
			<p>
				<a href="/">"Back to the planner"</a>
			</p>
		</div>
	}
}
