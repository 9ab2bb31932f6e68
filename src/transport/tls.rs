//! TLS configuration for the socket backend.
//!
//! Native root certificates are loaded once per process; the OS certificate
//! store can be slow to read on some platforms.

use std::sync::{Arc, OnceLock};

use rustls::pki_types::CertificateDer;

static NATIVE_ROOTS: OnceLock<Vec<CertificateDer<'static>>> = OnceLock::new();

fn load_native_roots() -> Vec<CertificateDer<'static>> {
    let result = rustls_native_certs::load_native_certs();

    for err in &result.errors {
        tracing::warn!(error = %err, "error loading native root certificate");
    }

    if result.certs.is_empty() {
        tracing::warn!("no native root CA certificates found");
    } else {
        tracing::debug!(count = result.certs.len(), "loaded native root certificates");
    }

    result.certs
}

/// Cached native root certificates (may be empty).
fn native_roots() -> &'static [CertificateDer<'static>] {
    NATIVE_ROOTS.get_or_init(load_native_roots).as_slice()
}

/// Uses the process-wide crypto provider when one is installed, aws-lc-rs otherwise.
fn crypto_provider() -> Arc<rustls::crypto::CryptoProvider> {
    rustls::crypto::CryptoProvider::get_default()
        .cloned()
        .unwrap_or_else(|| Arc::new(rustls::crypto::aws_lc_rs::default_provider()))
}

/// Builds a rustls client configuration trusting the OS root store.
///
/// # Errors
///
/// Returns a description of the problem when no usable root certificate is
/// available, so a broken trust store fails at construction rather than on
/// the first handshake.
pub(crate) fn client_config() -> Result<rustls::ClientConfig, String> {
    let certs = native_roots();
    if certs.is_empty() {
        return Err("no native root CA certificates found in OS certificate store".to_owned());
    }

    let mut roots = rustls::RootCertStore::empty();
    let (added, ignored) = roots.add_parsable_certificates(certs.iter().cloned());

    if ignored > 0 {
        tracing::warn!(added, ignored, "some native root certificates could not be parsed");
    }
    if added == 0 {
        return Err(format!(
            "no valid native root CA certificates (all {ignored} failed to parse)"
        ));
    }

    let config = rustls::ClientConfig::builder_with_provider(crypto_provider())
        .with_safe_default_protocol_versions()
        .map_err(|e| format!("failed to set TLS protocol versions: {e}"))?
        .with_root_certificates(roots)
        .with_no_client_auth();

    Ok(config)
}
