use gloo_console::error;
use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use shared::{AnalysisOutcome, AnalysisResult, YarnThickness};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{Model, Msg};

const ANALYZE_ENDPOINT: &str = "/api/analyze";

/// Posts the staged image and selected thickness; completion always comes
/// back through a single `AnalysisFinished` message tagged with the
/// staged-file generation it was issued for.
pub fn submit_analysis(
    ctx: &Context<Model>,
    generation: u64,
    file: GlooFile,
    thickness: YarnThickness,
) {
    spawn_local({
        let link = ctx.link().clone();

        async move {
            let outcome = request_analysis(file, thickness).await;
            if let Err(message) = &outcome {
                error!(format!("Analysis request failed: {}", message));
            }
            link.send_message(Msg::AnalysisFinished(generation, outcome));
        }
    });
}

async fn request_analysis(
    file: GlooFile,
    thickness: YarnThickness,
) -> Result<AnalysisResult, String> {
    let form_data = web_sys::FormData::new().expect("FormData construction never fails");
    form_data
        .append_with_str("thickness", &thickness.to_string())
        .expect("appending a form string never fails");
    form_data
        .append_with_blob_and_filename("image", file.as_ref(), &file.name())
        .expect("appending the staged blob never fails");

    let request = Request::post(ANALYZE_ENDPOINT)
        .body(form_data)
        .map_err(|e| format!("Failed to build request: {e}"))?;

    let response = request
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(format!("Server responded with status: {}", response.status()));
    }

    match response.json::<AnalysisOutcome>().await {
        Ok(AnalysisOutcome::Success(result)) => Ok(result),
        Ok(AnalysisOutcome::Failure { error }) => Err(error),
        Err(e) => Err(format!("Failed to parse response: {e}")),
    }
}
