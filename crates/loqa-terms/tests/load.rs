//! Loading terminology documents from disk.

use std::io::Write;

use loqa_terms::{TermsError, load_or_empty, load_terminology};
use pretty_assertions::assert_eq;

const DOC: &str = "\
### 核心术语替换表

| 中文 | 标准翻译 | ❌ 禁止用法 |
|---|---|---|
| 返佣 | Hoàn phí | Giảm giá |

## 中文残留片段映射

| 中文片段 | 替换 |
|---|---|
| 合约 | Futures |
";

#[test]
fn loads_a_document_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DOC.as_bytes()).unwrap();

    let tables = load_terminology(file.path()).unwrap();
    assert_eq!(tables.overrides["返佣"], "Hoàn phí");
    assert_eq!(tables.forbidden["Giảm giá"].correct, "Hoàn phí");
    assert_eq!(tables.fragments["合约"], "Futures");
}

#[test]
fn missing_document_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("越南语术语表.md");
    let error = load_terminology(&path).unwrap_err();
    assert!(matches!(error, TermsError::NotFound { .. }));
}

#[test]
fn missing_document_degrades_to_empty_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.md");
    assert!(load_or_empty(Some(&path)).is_empty());
    assert!(load_or_empty(None).is_empty());
}

#[test]
fn unreadable_document_degrades_to_empty_tables() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[0xff, 0xfe, 0x00, 0x80]).unwrap();

    assert!(matches!(
        load_terminology(file.path()),
        Err(TermsError::Read { .. })
    ));
    assert!(load_or_empty(Some(file.path())).is_empty());
}
