//! Wire types for the `/v1/prestadores` JSON API.
//!
//! Field names follow the JSON contract (camelCase, Spanish) rather than Rust naming, so a
//! reader can match each struct against a request or response body at a glance. Timestamps are
//! RFC 3339 strings and calendar dates are `YYYY-MM-DD` strings; parsing and validation happen
//! in `prestadores-core`.

mod afiliados;
mod common;
mod situaciones;
mod solicitudes;

pub use afiliados::*;
pub use common::*;
pub use situaciones::*;
pub use solicitudes::*;

#[cfg(test)]
mod tests {
    use utoipa::ToSchema;

    use super::*;

    #[test]
    fn partial_update_bodies_fill_missing_members_with_defaults() {
        let req: UpdateReintegroReq = serde_json::from_str(r#"{"monto": 60000}"#).unwrap();
        assert_eq!(req.monto, 60000.0);
        assert!(req.prestacion.is_empty());
        assert!(req.metodo.is_empty());

        let req: UpdateAutorizacionReq = serde_json::from_str("{}").unwrap();
        assert!(req.procedimiento.is_empty());

        let req: PatchSituacionReq = serde_json::from_str(r#"{"fechaFin": ""}"#).unwrap();
        assert_eq!(req.fecha_fin.as_deref(), Some(""));
        assert!(req.descripcion.is_none());
    }

    #[test]
    fn defaulted_bodies_produce_schemas() {
        let (name, _) = UpdateRecetaReq::schema();
        assert_eq!(name, "UpdateRecetaReq");
        let (name, _) = PatchSituacionReq::schema();
        assert_eq!(name, "PatchSituacionReq");
    }
}
