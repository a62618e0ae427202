//! E-invoice entities and downloaded files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::payos_model;

payos_model! {
    /// An e-invoice issued for a payment link.
    pub struct Invoice {
        invoice_id: String => "invoiceId",
        invoice_number: Option<String> => "invoiceNumber",
        issued_timestamp: Option<i64> => "issuedTimestamp",
        issued_datetime: Option<String> => "issuedDatetime",
        transaction_id: Option<String> => "transactionId",
        reservation_code: Option<String> => "reservationCode",
        code_of_tax: Option<String> => "codeOfTax",
    }
}

payos_model! {
    /// The invoices of one payment link.
    pub struct InvoicesInfo {
        #[serde(default)]
        invoices: Vec<Invoice> [nested Invoice],
    }
}

/// Filename used when the server does not name the file.
pub const DEFAULT_FILENAME: &str = "download";

/// A file returned by a download endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDownload {
    pub data: Vec<u8>,
    pub content_type: String,
    pub filename: String,
}

impl FileDownload {
    /// Size of the file in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Write the file to `path`.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, &self.data)
    }

    /// Write the file into `dir` under its own filename, creating `dir` if
    /// needed. Returns the written path.
    ///
    /// Only the final component of the filename is used, so a server-chosen
    /// name cannot escape `dir`.
    pub fn save_to_directory(&self, dir: impl AsRef<Path>) -> io::Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let name = Path::new(&self.filename)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_FILENAME.into());
        let path = dir.join(name);
        self.save_to_file(&path)?;
        Ok(path)
    }
}

/// Filename carried by a `content-disposition` header value.
///
/// Understands `filename="x"`, bare `filename=x` and the RFC 5987
/// `filename*=UTF-8''x` form, which takes precedence.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    for param in header.split(';').map(str::trim) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                let encoded = value.trim().trim_matches('"').splitn(3, '\'').nth(2);
                if let Some(Ok(decoded)) = encoded.map(urlencoding::decode) {
                    if !decoded.is_empty() {
                        return Some(decoded.into_owned());
                    }
                }
            }
            "filename" => {
                let name = value.trim().trim_matches('"');
                if !name.is_empty() {
                    plain = Some(name.to_string());
                }
            }
            _ => {}
        }
    }
    plain
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Model, Naming};
    use serde_json::json;

    #[test]
    fn test_invoices_info_parses_partial_invoices() {
        let info = InvoicesInfo::from_wire(json!({
            "invoices": [
                {
                    "invoiceId": "invoice-id",
                    "invoiceNumber": "INV-001",
                    "issuedTimestamp": 1765504800,
                    "issuedDatetime": "2025-12-12T02:00:00.000Z",
                    "transactionId": "txn-id",
                    "reservationCode": "RES-CODE",
                    "codeOfTax": "TAX-CODE"
                },
                {"invoiceId": "invoice-id"}
            ]
        }))
        .unwrap();

        assert_eq!(info.invoices.len(), 2);
        assert_eq!(info.invoices[0].invoice_number.as_deref(), Some("INV-001"));
        assert_eq!(info.invoices[0].get("codeOfTax").unwrap(), json!("TAX-CODE"));
        assert!(info.invoices[1].invoice_number.is_none());

        let alias = info.model_dump(Naming::Alias).unwrap();
        assert_eq!(alias["invoices"][0]["issuedTimestamp"], json!(1765504800));
    }

    #[test]
    fn test_missing_invoice_list_is_empty() {
        let info = InvoicesInfo::from_wire(json!({})).unwrap();
        assert!(info.invoices.is_empty());
    }

    #[test]
    fn test_filename_from_content_disposition() {
        let cases = [
            (r#"attachment; filename="invoice.pdf""#, Some("invoice.pdf")),
            ("attachment; filename=document.bin", Some("document.bin")),
            (
                r#"attachment; filename="fallback.pdf"; filename*=UTF-8''h%C3%B3a%20%C4%91%C6%A1n.pdf"#,
                Some("hóa đơn.pdf"),
            ),
            ("attachment", None),
            (r#"attachment; filename="""#, None),
        ];
        for (header, expected) in cases {
            assert_eq!(
                filename_from_content_disposition(header).as_deref(),
                expected,
                "{}",
                header
            );
        }
    }

    #[test]
    fn test_save_to_directory_keeps_file_inside() {
        let dir = std::env::temp_dir().join(format!("payos-download-{}", std::process::id()));
        let file = FileDownload {
            data: b"mock-pdf-data".to_vec(),
            content_type: "application/pdf".into(),
            filename: "../escape.pdf".into(),
        };

        let path = file.save_to_directory(&dir).unwrap();
        assert_eq!(path, dir.join("escape.pdf"));
        assert_eq!(fs::read(&path).unwrap(), b"mock-pdf-data");
        assert_eq!(file.size(), 13);

        fs::remove_dir_all(&dir).unwrap();
    }
}
