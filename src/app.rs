use leptos::prelude::*;

use crate::components::recorder::RecorderSection;
use crate::components::results::ResultsSection;
use crate::components::text_entry::TextEntrySection;
use crate::model::{InputMode, WorkoutData};

#[component]
pub fn App() -> impl IntoView {
    let (workout, set_workout) = signal::<Option<WorkoutData>>(None);
    let (input_mode, set_input_mode) = signal(InputMode::default());
    // Screen-owned so the draft and its in-flight flag survive mode switches.
    let (text_input, set_text_input) = signal(String::new());
    let (is_processing_text, set_is_processing_text) = signal(false);

    view! {
        <main class="shell">
            <header class="hero">
                <p class="eyebrow">"MVP (Data Collection Mode)"</p>
                <h1>"Coach AI Assistant"</h1>
                <p class="tagline">"Assign workouts using voice commands or text instructions."</p>
            </header>

            <div class="mode-switch">
                <button
                    class:active=move || input_mode.get() == InputMode::Voice
                    on:click=move |_| set_input_mode.set(InputMode::Voice)
                >
                    "Voice"
                </button>
                <button
                    class:active=move || input_mode.get() == InputMode::Text
                    on:click=move |_| set_input_mode.set(InputMode::Text)
                >
                    "Text"
                </button>
            </div>

            {move || match input_mode.get() {
                InputMode::Voice => view! { <RecorderSection set_workout/> }.into_any(),
                InputMode::Text => view! {
                    <TextEntrySection
                        text_input set_text_input
                        is_processing=is_processing_text
                        set_is_processing=set_is_processing_text
                        set_workout
                    />
                }.into_any(),
            }}

            <ResultsSection workout set_workout/>
        </main>
    }
}
