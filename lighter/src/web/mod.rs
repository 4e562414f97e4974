// Web-Modul: Schnittstelle zum (externen) HTTP-Aufrufer
// Enthält nur das Query-Protokoll, keinen Server

pub mod protocol;

pub use protocol::{CommandKind, LightQuery, ParsedValue, QueryParam};
