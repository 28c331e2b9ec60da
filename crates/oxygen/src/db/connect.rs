use oxygen_core::{driver::Driver, Error, Result};

use url::Url;

/// Pick the driver matching the scheme of `url`.
pub fn driver_for_url(url: &str) -> Result<Box<dyn Driver>> {
    let parsed = Url::parse(url)
        .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url}")))?;

    match parsed.scheme() {
        "mysql" => connect_mysql(url),
        "sqlite" => connect_sqlite(url),
        scheme => Err(Error::invalid_connection_url(format!(
            "unsupported database; scheme={scheme}; url={url}"
        ))),
    }
}

#[cfg(feature = "mysql")]
fn connect_mysql(url: &str) -> Result<Box<dyn Driver>> {
    Ok(Box::new(oxygen_driver_mysql::MySQL::new(url)?))
}

#[cfg(not(feature = "mysql"))]
fn connect_mysql(_url: &str) -> Result<Box<dyn Driver>> {
    Err(Error::invalid_connection_url("`mysql` feature not enabled"))
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &str) -> Result<Box<dyn Driver>> {
    Ok(Box::new(oxygen_driver_sqlite::Sqlite::new(url)?))
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_url: &str) -> Result<Box<dyn Driver>> {
    Err(Error::invalid_connection_url("`sqlite` feature not enabled"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_unknown_scheme() {
        let err = driver_for_url("postgresql://localhost/app").unwrap_err();
        assert!(err.is_invalid_connection_url());

        let err = driver_for_url("not a url").unwrap_err();
        assert!(err.is_invalid_connection_url());
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn sqlite_url() {
        let driver = driver_for_url("sqlite::memory:").unwrap();
        assert_eq!(driver.url(), "sqlite::memory:");
    }
}
