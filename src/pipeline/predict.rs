use tracing::{debug, info, warn};

use crate::core::{FeatureRecord, ModelFeatureVector, Prediction};
use crate::error::{PipelineError, PredictionFailed, SchemaMismatch};
use crate::pipeline::{ModelContext, project};
use crate::session::ResultStore;

/// Transform then classify one projected row.
///
/// The vector is re-checked against the context's training schema before
/// anything touches the artifacts.
pub fn predict(
    ctx: &ModelContext,
    vector: &ModelFeatureVector,
) -> Result<Prediction, PipelineError> {
    let schema = ctx.schema();
    if !schema.matches(vector.names()) {
        let found = vector.names().to_vec();
        let missing = schema
            .fields
            .iter()
            .filter(|f| !found.iter().any(|n| n == *f))
            .map(|f| f.to_string())
            .collect();
        return Err(SchemaMismatch {
            expected: schema.field_names(),
            found,
            missing,
        }
        .into());
    }

    let scaled = ctx
        .transform()
        .transform(vector.values())
        .map_err(|cause| PredictionFailed {
            stage: "transform",
            cause,
        })?;

    let prediction = ctx
        .classifier()
        .predict(&scaled)
        .map_err(|cause| PredictionFailed {
            stage: "classifier",
            cause,
        })?;

    debug!(?scaled, code = prediction.code, "classified");
    Ok(prediction)
}

/// Project, predict, and commit to `store` on success.
///
/// On any error the store keeps whatever it held before.
pub fn run_prediction(
    ctx: &ModelContext,
    record: &FeatureRecord,
    store: &mut ResultStore,
) -> Result<Prediction, PipelineError> {
    let vector = project(record, ctx.schema())?;
    let prediction = predict(ctx, &vector)?;
    store.commit(prediction);
    if !ctx.labels().has_label(prediction.code) {
        warn!(code = prediction.code, "prediction code has no risk label");
    }
    info!(
        code = prediction.code,
        confidence = prediction.confidence,
        predictions = store.predictions_made(),
        "prediction updated"
    );
    Ok(prediction)
}
