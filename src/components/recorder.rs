use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::Blob;

use crate::api;
use crate::capture::{self, CaptureSession, ObjectUrl};
use crate::model::WorkoutData;
use crate::utils::alert;

async fn transcribe_and_parse(blob: &Blob) -> Result<(String, WorkoutData), String> {
    let bytes = capture::blob_bytes(blob)
        .await
        .map_err(|err| format!("{err:?}"))?;
    let text = api::transcribe_audio(bytes).await?;
    let data = api::parse_text(&text).await?;
    Ok((text, data))
}

#[component]
pub fn RecorderSection(set_workout: WriteSignal<Option<WorkoutData>>) -> impl IntoView {
    let (is_recording, set_is_recording) = signal(false);
    let (is_processing, set_is_processing) = signal(false);
    let (transcript, set_transcript) = signal(String::new());
    let (audio_url, set_audio_url) = signal::<Option<String>>(None);

    let session = StoredValue::new_local(None::<CaptureSession>);
    let playback = StoredValue::new_local(None::<ObjectUrl>);
    // Bumped on every new session; pending upload continuations compare
    // against it and bail out when stale (or when the component is gone).
    let epoch = StoredValue::new_local(0u64);

    let toggle_recording = move |_| {
        if is_processing.get() {
            return;
        }

        if !is_recording.get() {
            spawn_local(async move {
                match CaptureSession::start().await {
                    // Denial leaves all prior state in place.
                    Ok(new_session) => {
                        epoch.update_value(|e| *e += 1);
                        set_transcript.set(String::new());
                        set_audio_url.set(None);
                        // Dropping the previous guard revokes its URL.
                        playback.set_value(None);
                        session.set_value(Some(new_session));
                        set_is_recording.set(true);
                    }
                    Err(err) => {
                        leptos::logging::error!("Error accessing microphone: {err:?}");
                        alert("Could not access microphone. Please enable permissions.");
                    }
                }
            });
            return;
        }

        set_is_recording.set(false);
        let Some(active) = session.try_update_value(|s| s.take()).flatten() else {
            return;
        };
        let started = epoch.get_value();

        let stopped = active.stop(move |finalized| {
            spawn_local(async move {
                if epoch.try_get_value() != Some(started) {
                    return;
                }

                let blob = match finalized {
                    Ok(blob) => blob,
                    Err(err) => {
                        leptos::logging::error!("Error finalizing recording: {err:?}");
                        alert("Error processing audio. Ensure backend is running.");
                        return;
                    }
                };

                match ObjectUrl::new(&blob) {
                    Ok(url) => {
                        set_audio_url.set(Some(url.as_str().to_string()));
                        playback.set_value(Some(url));
                    }
                    Err(err) => leptos::logging::error!("Error creating playback URL: {err:?}"),
                }

                set_is_processing.set(true);
                let outcome = transcribe_and_parse(&blob).await;
                if epoch.try_get_value() != Some(started) {
                    return;
                }
                match outcome {
                    Ok((text, data)) => {
                        set_transcript.set(text);
                        set_workout.set(Some(data));
                    }
                    Err(err) => {
                        leptos::logging::error!("Error processing audio: {err}");
                        alert("Error processing audio. Ensure backend is running.");
                    }
                }
                set_is_processing.set(false);
            });
        });
        if let Err(err) = stopped {
            leptos::logging::error!("Error stopping recorder: {err:?}");
        }
    };

    view! {
        <section class="card control-card">
            <div class="card-header">
                <div>
                    <p class="eyebrow">"Voice Command"</p>
                    <h2>"Speak clearly to assign a workout"</h2>
                </div>
                <span class="pill"
                    class:live=move || is_recording.get()
                    class:glow=move || is_processing.get()
                    class:idle=move || !is_recording.get() && !is_processing.get()
                >
                    {move || if is_recording.get() { "Recording" } else if is_processing.get() { "Processing" } else { "Idle" }}
                </span>
            </div>
            <div class="control-row">
                <button
                    class="record-button"
                    class:recording=move || is_recording.get()
                    on:click=toggle_recording
                    disabled=move || is_processing.get()
                >
                    {move || {
                        if is_processing.get() { "Working..." }
                        else if is_recording.get() { "Stop recording" }
                        else { "Start recording" }
                    }}
                </button>
                {move || is_recording.get().then(|| view! {
                    <p class="recording-indicator">"Recording..."</p>
                })}
            </div>
            {move || {
                let text = transcript.get();
                (!text.is_empty()).then(|| view! {
                    <div class="transcript-box">
                        <p class="eyebrow">"Transcript"</p>
                        <p class="transcript-text">{format!("\u{201c}{text}\u{201d}")}</p>
                    </div>
                })
            }}
            {move || audio_url.get().map(|url| view! {
                <audio class="playback" src=url controls=true></audio>
            })}
        </section>
    }
}
