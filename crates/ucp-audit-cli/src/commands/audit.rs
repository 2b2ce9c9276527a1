//! Audit command implementation.

use crate::cli::AuditArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use ucp_audit_domain::{Document, DocumentKind};
use ucp_audit_engine::{AuditRequest, PdfAuditor};
use ucp_audit_pdf::PdfTextExtractor;

/// Execute the audit command.
pub async fn execute_audit(args: AuditArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let request = build_request(&args, config)?;
    let api_key = config.resolve_api_key(args.api_key.as_deref())?;
    let audit_config = config.audit_config(args.model.as_deref())?;

    info!("Auditing with model '{}'", audit_config.model);
    eprintln!("{}", formatter.info("Analyzing documents..."));

    let auditor: PdfAuditor<_> = PdfAuditor::new(
        config.provider(api_key),
        PdfTextExtractor::new(),
        audit_config,
    );
    let report = auditor.audit(request).await?;

    println!("{}", formatter.format_report(&report)?);

    if args.show_raw {
        println!();
        println!("{}", formatter.raw_response(report.raw_response()));
    }

    Ok(())
}

/// Read the input files into an audit request.
///
/// All three required documents must be given; the reference comes from
/// `--reference`, or from the config unless `--no-reference` is set.
pub fn build_request(args: &AuditArgs, config: &Config) -> Result<AuditRequest> {
    let (lc, invoice, bl) = match (&args.lc, &args.invoice, &args.bl) {
        (Some(lc), Some(invoice), Some(bl)) => (lc, invoice, bl),
        _ => {
            let missing: Vec<&str> = [
                ("--lc", &args.lc),
                ("--invoice", &args.invoice),
                ("--bl", &args.bl),
            ]
            .into_iter()
            .filter(|(_, path)| path.is_none())
            .map(|(flag, _)| flag)
            .collect();
            return Err(CliError::InvalidInput(format!(
                "Please provide all three documents (LC, Invoice, BL). Missing: {}",
                missing.join(", ")
            )));
        }
    };

    let request = AuditRequest::new(
        load_document(DocumentKind::LetterOfCredit, lc)?,
        load_document(DocumentKind::Invoice, invoice)?,
        load_document(DocumentKind::BillOfLading, bl)?,
    );

    Ok(request.with_reference(load_reference(args, config)?))
}

fn load_reference(args: &AuditArgs, config: &Config) -> Result<Option<Document>> {
    if args.no_reference {
        return Ok(None);
    }

    if let Some(path) = &args.reference {
        return load_document(DocumentKind::Reference, path).map(Some);
    }

    match &config.reference_path {
        Some(path) if path.exists() => load_document(DocumentKind::Reference, path).map(Some),
        Some(path) => {
            warn!("Configured reference {} not found; auditing without it", path.display());
            Ok(None)
        }
        None => Ok(None),
    }
}

fn load_document(kind: DocumentKind, path: &Path) -> Result<Document> {
    let bytes = fs::read(path).map_err(|e| {
        CliError::InvalidInput(format!("Cannot read {} '{}': {}", kind, path.display(), e))
    })?;
    Ok(Document::new(kind, display_name(path), bytes))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
