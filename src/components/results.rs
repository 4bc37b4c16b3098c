use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;

use crate::model::{
    attribute_value_class, card_title, confidence_badge_class, confidence_badge_text, Assignment,
    WorkoutData,
};

fn copy_to_clipboard(text: String) {
    let Some(window) = leptos::web_sys::window() else {
        return;
    };
    let clipboard = window.navigator().clipboard();
    spawn_local(async move {
        if let Err(err) = JsFuture::from(clipboard.write_text(&text)).await {
            leptos::logging::error!("Error copying to clipboard: {err:?}");
        }
    });
}

fn assignment_card(data: &WorkoutData, index: usize, assignment: &Assignment) -> impl IntoView {
    let confidence = data.confidence.clone();
    let rows = assignment
        .attributes
        .iter()
        .map(|attr| {
            let chip = attribute_value_class(&attr.key, &attr.value);
            view! {
                <tr>
                    <td class="attr-key">{attr.key.clone()}</td>
                    <td class="attr-value">
                        <span class=chip>{attr.value.clone()}</span>
                    </td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <div class="card result-card">
            <div class="card-header">
                <h3>{card_title(data.assignments.len(), index)}</h3>
                <span class=confidence_badge_class(confidence.as_deref())>
                    {confidence_badge_text(confidence.as_deref())}
                </span>
            </div>
            <table class="attr-table">
                <thead>
                    <tr>
                        <th>"Attribute"</th>
                        <th>"Value"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </div>
    }
}

#[component]
pub fn ResultsSection(
    workout: ReadSignal<Option<WorkoutData>>,
    set_workout: WriteSignal<Option<WorkoutData>>,
) -> impl IntoView {
    view! {
        {move || workout.get().filter(|data| data.is_error()).map(|data| {
            let message = data.error.unwrap_or_default();
            view! {
                <div class="error-banner">
                    <p>{format!("{message} Please try again.")}</p>
                </div>
            }
        })}
        {move || workout.get().filter(|data| data.has_assignments()).map(|data| {
            let cards = data
                .assignments
                .iter()
                .enumerate()
                .map(|(index, assignment)| assignment_card(&data, index, assignment))
                .collect_view();
            let json = serde_json::to_string_pretty(&data).unwrap_or_default();
            let json_for_copy = json.clone();

            view! {
                <div class="results">
                    {cards}
                    <details class="debug-details">
                        <summary>"View Engineer/Debug Data (JSON)"</summary>
                        <div class="debug-json">
                            <button
                                class="ghost compact copy-button"
                                title="Copy JSON"
                                on:click=move |_| copy_to_clipboard(json_for_copy.clone())
                            >
                                "Copy"
                            </button>
                            <pre>{json}</pre>
                        </div>
                    </details>
                    <div class="result-actions">
                        <button class="ghost" on:click=move |_| set_workout.set(None)>
                            "Discard"
                        </button>
                        <button class="primary">"Confirm Assignment"</button>
                    </div>
                </div>
            }
        })}
    }
}
