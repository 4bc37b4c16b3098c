use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::model::WorkoutData;
use crate::utils::{can_submit, submits_on_key, textarea_value};

#[component]
pub fn TextEntrySection(
    text_input: ReadSignal<String>,
    set_text_input: WriteSignal<String>,
    is_processing: ReadSignal<bool>,
    set_is_processing: WriteSignal<bool>,
    set_workout: WriteSignal<Option<WorkoutData>>,
) -> impl IntoView {
    let submit = move || {
        let text = text_input.get_untracked();
        if !can_submit(&text, is_processing.get_untracked()) {
            return;
        }

        set_workout.set(None);
        set_is_processing.set(true);
        spawn_local(async move {
            match api::parse_text(&text).await {
                Ok(data) => set_workout.set(Some(data)),
                Err(err) => {
                    leptos::logging::error!("Error processing text: {err}");
                    set_workout.set(Some(WorkoutData::from_error(
                        "Could not process text. Ensure backend is running.",
                    )));
                }
            }
            set_is_processing.set(false);
        });
    };

    view! {
        <section class="card entry-card">
            <label class="entry-label">"Enter Workout Instructions"</label>
            <textarea
                class="entry-area"
                placeholder="e.g., Assign a 10km run to Sarah at 7am"
                prop:value=move || text_input.get()
                on:input=move |ev| set_text_input.set(textarea_value(&ev))
                on:keydown=move |ev| {
                    if submits_on_key(&ev.key(), ev.shift_key()) {
                        ev.prevent_default();
                        submit();
                    }
                }
            ></textarea>
            <button
                class="primary submit-button"
                on:click=move |_| submit()
                disabled=move || !can_submit(&text_input.get(), is_processing.get())
            >
                {move || if is_processing.get() { "Processing..." } else { "Process Instruction" }}
            </button>
            <p class="entry-hint">"Press Enter to submit"</p>
        </section>
    }
}
