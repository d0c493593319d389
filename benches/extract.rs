// benches/extract.rs
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use unsc_votes::diag::NullDiagnostics;
use unsc_votes::export::to_dataset;
use unsc_votes::scrape::handle_xml_documents;
use unsc_votes::store::YearPage;

const COUNTRIES: [&str; 15] = [
    "CN", "FR", "RU", "GB", "US", "AL", "BR", "EC", "GA", "GH", "JP", "MT", "MZ", "CH", "AE",
];

/// One year's worth of records, every fourth one unanimous without indicators.
fn synthetic_year(records: usize) -> String {
    let mut doc = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<collection xmlns=\"http://www.loc.gov/MARC21/slim\">\n");
    for n in 1..=records {
        let unmarked = n % 4 == 0;
        doc.push_str("<record>\n");
        doc.push_str(&format!(
            "<datafield tag=\"245\" ind1=\" \" ind2=\" \"><subfield code=\"a\">Resolution {n} (2023)</subfield></datafield>\n\
             <datafield tag=\"791\" ind1=\" \" ind2=\" \"><subfield code=\"a\">S/RES/{n}(2023)</subfield></datafield>\n\
             <datafield tag=\"952\" ind1=\" \" ind2=\" \"><subfield code=\"a\">S/PV.{n}</subfield></datafield>\n\
             <datafield tag=\"269\" ind1=\" \" ind2=\" \"><subfield code=\"a\">2023-01-01</subfield></datafield>\n"
        ));
        for (i, c) in COUNTRIES.iter().enumerate() {
            let d = match (unmarked, i % 5) {
                (true, _) => "",
                (false, 0) => "A",
                _ => "Y",
            };
            doc.push_str(&format!(
                "<datafield tag=\"967\" ind1=\" \" ind2=\" \"><subfield code=\"c\">{c}</subfield><subfield code=\"d\">{d}</subfield></datafield>\n"
            ));
        }
        let yes = if unmarked { 15 } else { 12 };
        doc.push_str(&format!(
            "<datafield tag=\"996\" ind1=\" \" ind2=\" \"><subfield code=\"b\">{yes}</subfield></datafield>\n</record>\n"
        ));
    }
    doc.push_str("</collection>\n");
    doc
}

fn bench_extract(c: &mut Criterion) {
    let pages = vec![YearPage { year: 2023, body: synthetic_year(200) }];

    c.bench_function("extract_200_records", |b| {
        b.iter(|| {
            let records = handle_xml_documents(black_box(&pages), &mut NullDiagnostics).unwrap();
            black_box(records.len())
        })
    });

    let records = handle_xml_documents(&pages, &mut NullDiagnostics).unwrap();
    c.bench_function("flatten_200_records", |b| {
        b.iter(|| black_box(to_dataset(black_box(&records))).rows.len())
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
