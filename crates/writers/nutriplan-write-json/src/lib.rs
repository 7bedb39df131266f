//! JSON writer for nutriplan.
//!
//! Emits the parsed [`DietPlan`] attached to a document, in the shape
//! `{"meals": [{"title", "items", "isNotes", "icon"}], "stats": {"calories": "2000"}}`.

use nutriplan_core::{ConversionResult, DietPlan, Document, EmitError, EmitOptions, Emitter};

/// Emit the document's plan as compact JSON.
pub fn emit(doc: &Document) -> Result<ConversionResult<Vec<u8>>, EmitError> {
    emit_with_options(doc, &EmitOptions::default())
}

/// Emit the document's plan as JSON with custom options.
pub fn emit_with_options(
    doc: &Document,
    options: &EmitOptions,
) -> Result<ConversionResult<Vec<u8>>, EmitError> {
    let plan = doc.plan.as_ref().ok_or(EmitError::MissingPlan)?;
    emit_plan(plan, options).map(ConversionResult::ok)
}

/// Serialize a plan directly.
pub fn emit_plan(plan: &DietPlan, options: &EmitOptions) -> Result<Vec<u8>, EmitError> {
    if options.pretty {
        serde_json::to_vec_pretty(plan)
    } else {
        serde_json::to_vec(plan)
    }
    .map_err(|e| EmitError::Serialize(e.to_string()))
}

/// [`Emitter`] for the `json` format.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonWriter;

impl Emitter for JsonWriter {
    fn formats(&self) -> &[&str] {
        &["json"]
    }

    fn emit(
        &self,
        doc: &Document,
        options: &EmitOptions,
    ) -> Result<ConversionResult<Vec<u8>>, EmitError> {
        emit_with_options(doc, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn to_value(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[test]
    fn test_emit_plan_shape() {
        let plan = nutriplan_read_plan::parse("الغداء 200جم صدور دجاج\nسعرات\n2000");
        let bytes = emit_plan(&plan, &EmitOptions::default()).unwrap();

        assert_eq!(
            to_value(&bytes),
            json!({
                "meals": [{
                    "title": "الغداء",
                    "items": "200جم صدور دجاج",
                    "isNotes": false,
                    "icon": "\u{1F37D}\u{FE0F}",
                }],
                "stats": { "calories": "2000" },
            })
        );
    }

    #[test]
    fn test_round_trip_through_serde() {
        let plan = nutriplan_read_plan::parse(nutriplan_read_plan::SAMPLE_PLAN);
        let bytes = emit_plan(&plan, &EmitOptions::default().pretty()).unwrap();
        let back: DietPlan = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, plan);
    }

    #[test]
    fn test_pretty() {
        let plan = DietPlan::new();
        let compact = emit_plan(&plan, &EmitOptions::default()).unwrap();
        let pretty = emit_plan(&plan, &EmitOptions::default().pretty()).unwrap();
        assert_eq!(compact, br#"{"meals":[],"stats":{}}"#);
        assert!(pretty.contains(&b'\n'));
    }

    #[test]
    fn test_document_without_plan() {
        let err = emit(&Document::new()).unwrap_err();
        assert!(matches!(err, EmitError::MissingPlan));
    }

    #[test]
    fn test_writer_trait() {
        let doc = Document::new().with_plan(DietPlan::new());
        let out = JsonWriter.emit(&doc, &EmitOptions::default()).unwrap();
        assert_eq!(to_value(&out.value), json!({"meals": [], "stats": {}}));
    }
}
