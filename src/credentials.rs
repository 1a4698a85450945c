use std::path::Path;

use url::Url;

use crate::{errors::HkError, netrc::Netrc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub login: String,
    pub secret: String,
    pub host: String,
}

/// Credentials embedded in the URL win; otherwise the netrc file at `netrc_path`
/// must hold an entry for the URL's host. Nothing is cached between calls.
pub fn resolve(url: &Url, netrc_path: &Path) -> Result<Credential, HkError> {
    let host = machine_key(url);

    if !url.username().is_empty() {
        return Ok(Credential {
            login: url.username().to_owned(),
            secret: url.password().unwrap_or_default().to_owned(),
            host,
        });
    }

    let contents =
        std::fs::read_to_string(netrc_path).map_err(|source| HkError::CredentialStoreUnreadable {
            path: netrc_path.to_path_buf(),
            source,
        })?;
    let netrc = Netrc::parse(&contents).map_err(|source| HkError::CredentialStoreMalformed {
        path: netrc_path.to_path_buf(),
        source,
    })?;

    let machine = netrc
        .find_machine(&host)
        .ok_or_else(|| HkError::NoCredentials {
            host: host.clone(),
            path: netrc_path.to_path_buf(),
        })?;
    tracing::debug!(host = %host, "using netrc credentials");

    Ok(Credential {
        login: machine.login.clone(),
        secret: machine.password.clone(),
        host,
    })
}

/// `host` or `host:port`; the port appears only when the URL spells out a
/// non-default one.
fn machine_key(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_owned(),
    }
}
