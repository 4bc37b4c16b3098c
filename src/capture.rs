use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Uint8Array};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobEvent, BlobPropertyBag, MediaRecorder, MediaStream, MediaStreamConstraints,
    MediaStreamTrack, Url,
};

/// One microphone capture session. Owns the recorder, the stream it was
/// built from, and the chunk sequence the data callback appends to. At most
/// one session is live at a time; callers replace the whole value to start
/// over.
pub struct CaptureSession {
    recorder: MediaRecorder,
    stream: MediaStream,
    chunks: Rc<RefCell<Vec<Blob>>>,
    on_data: Closure<dyn FnMut(BlobEvent)>,
}

impl CaptureSession {
    /// Requests microphone access and starts recording. Fails without side
    /// effects when the device is denied or absent.
    pub async fn start() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let devices = window.navigator().media_devices()?;

        let constraints = MediaStreamConstraints::new();
        constraints.set_audio(&JsValue::TRUE);
        let stream: MediaStream = JsFuture::from(devices.get_user_media_with_constraints(&constraints)?)
            .await?
            .dyn_into()?;

        let recorder = MediaRecorder::new_with_media_stream(&stream)?;
        let chunks: Rc<RefCell<Vec<Blob>>> = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&chunks);
        let on_data = Closure::<dyn FnMut(BlobEvent)>::new(move |event: BlobEvent| {
            if let Some(data) = event.data() {
                if data.size() > 0.0 {
                    sink.borrow_mut().push(data);
                }
            }
        });
        recorder.set_ondataavailable(Some(on_data.as_ref().unchecked_ref()));
        recorder.start()?;

        Ok(Self {
            recorder,
            stream,
            chunks,
            on_data,
        })
    }

    /// Stops the recorder and hands the finalized artifact to `on_finalize`
    /// once the platform confirms the stop. The microphone is released before
    /// the callback runs; no chunks are accepted afterwards.
    pub fn stop(self, on_finalize: impl FnOnce(Result<Blob, JsValue>) + 'static) -> Result<(), JsValue> {
        let Self {
            recorder,
            stream,
            chunks,
            on_data,
        } = self;

        let handler = Closure::once(move || {
            // The final data event fires before onstop; keep the callback
            // alive until now.
            drop(on_data);
            release_stream(&stream);
            on_finalize(concat_chunks(&chunks.borrow()));
        });
        recorder.set_onstop(Some(handler.as_ref().unchecked_ref()));
        handler.forget();
        recorder.stop()
    }
}

fn release_stream(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

fn concat_chunks(chunks: &[Blob]) -> Result<Blob, JsValue> {
    let parts = Array::new();
    for chunk in chunks {
        parts.push(chunk);
    }
    let options = BlobPropertyBag::new();
    options.set_type("audio/wav");
    Blob::new_with_blob_sequence_and_options(&parts, &options)
}

/// Reads the full contents of a blob.
pub async fn blob_bytes(blob: &Blob) -> Result<Vec<u8>, JsValue> {
    let buffer = JsFuture::from(blob.array_buffer()).await?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

/// Playable object URL for a finished recording, revoked when dropped so a
/// replaced or unmounted session never leaks its URL.
pub struct ObjectUrl {
    url: String,
}

impl ObjectUrl {
    pub fn new(blob: &Blob) -> Result<Self, JsValue> {
        Ok(Self {
            url: Url::create_object_url_with_blob(blob)?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        let _ = Url::revoke_object_url(&self.url);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

    wasm_bindgen_test_configure!(run_in_browser);

    fn chunk_of(len: u32) -> Blob {
        let bytes = Uint8Array::new_with_length(len);
        let parts = Array::of1(&bytes);
        Blob::new_with_u8_array_sequence(&parts).unwrap()
    }

    #[wasm_bindgen_test]
    fn finalized_artifact_size_is_sum_of_chunks() {
        let artifact = concat_chunks(&[chunk_of(1024), chunk_of(2048)]).unwrap();
        assert_eq!(artifact.size(), 3072.0);
        assert_eq!(artifact.type_(), "audio/wav");
    }

    #[wasm_bindgen_test]
    fn session_without_data_events_yields_empty_artifact() {
        let artifact = concat_chunks(&[]).unwrap();
        assert_eq!(artifact.size(), 0.0);
    }

    #[wasm_bindgen_test]
    async fn artifact_bytes_match_blob_size() {
        let artifact = concat_chunks(&[chunk_of(1024), chunk_of(2048)]).unwrap();
        let bytes = blob_bytes(&artifact).await.unwrap();
        assert_eq!(bytes.len(), 3072);
    }
}
