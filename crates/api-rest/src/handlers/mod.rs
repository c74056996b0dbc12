pub mod afiliados;
pub mod situaciones;
pub mod solicitudes;
pub mod system;
