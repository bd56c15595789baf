//! Shared fixtures for the integration tests.

use std::fs;
use std::path::{Path, PathBuf};

/// A statement export as the bank produces it: banner blocks followed by
/// three entries, one of them a duplicate of the first.
pub fn statement_text() -> String {
    let sep = "_".repeat(84);
    format!(
        "\
                              Transakční historie
{sep}
ČÍSLO ÚČTU : 107399/5400               MĚNA ÚČTU : CZK
Za období      od 01.10.2010 do 31.10.2010
{sep}
Číslo protiúčtu                VS         Částka                  Datum splatnosti
Typ transakce                  KS                                 Datum odepsání
Identifikace transakce         SS                                 Datum valuty
{sep}
107399/5400                    232748902 -12,00 CZK                   10.10.2010
Inkaso                         308                                    21.10.2010
120-20101010 1010 O01ICFD      0                                      21.10.2010
Popis příkazce                 SVOBODA JAN
Popis pro příjemce             VODAFONE CZECH REPUBLIC
Systémový popis                Úhrada do jiné banky
Zpráva pro příjemce            040500975602000
{sep}
2000145399/0800                          +12500,00 CZK                  05.11.2010
Úhrada                         558                                    05.11.2010
1005-05112010 0800 A77XWPQ     12                                     05.11.2010
Popis příkazce                 NOVAK PETR
Popis pro příjemce             NAJEM LISTOPAD
Systémový popis                Příchozí úhrada
{sep}
107399/5400                    232748902 -12,00 CZK                   10.10.2010
Inkaso                         308                                    21.10.2010
120-20101010 1010 O01ICFD      0                                      21.10.2010
Popis příkazce                 SVOBODA JAN
Popis pro příjemce             VODAFONE CZECH REPUBLIC
Systémový popis                Úhrada do jiné banky
Zpráva pro příjemce            040500975602000
{sep}
Obrat na vrub                  24,00 CZK
Obrat ve prospěch              12500,00 CZK
{sep}
"
    )
    .replace('\n', "\r\n")
}

/// Write the fixture in the bank's code page.
pub fn write_statement(dir: &Path, name: &str) -> PathBuf {
    write_encoded(dir, name, &statement_text())
}

/// Write `text` in the bank's code page.
pub fn write_encoded(dir: &Path, name: &str, text: &str) -> PathBuf {
    let (bytes, _, had_errors) = encoding_rs::WINDOWS_1250.encode(text);
    assert!(!had_errors);

    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

/// Files in `dir` whose name starts with the output prefix, sorted.
pub fn outputs(dir: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("mojebanka_export_"))
        })
        .collect();
    found.sort();
    found
}
