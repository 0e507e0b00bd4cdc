//! JSON output module for the command line
//!
//! Provides schema-versioned response types for every command.

pub mod command;

pub use command::{
    generate_execution_id, output_json, BuildResponse, DepsResponse, ErrorResponse, FocusResponse,
    JsonResponse, OutputFormat, ParseResponse, ScanResponse, ScannedFile, LINKEDDOC_JSON_SCHEMA_VERSION,
};
