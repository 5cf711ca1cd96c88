use std::collections::HashSet;
use std::path::Path;

/// Taxonomy snapshots compiled into the binary. Must match `catalog::source::EMBEDDED_TABLES`.
const EMBEDDED_TABLES: &[&str] = &[
    "data/processed/avilist_2025_taxonomy.csv",
    "data/processed/ebird_2023_taxonomy.csv",
    "data/processed/ebird_2024_taxonomy.csv",
    "data/processed/birdlife_2024_taxonomy.csv",
    "data/processed/ibp_2024_taxonomy.csv",
    "data/processed/bbl_2025_taxonomy.csv",
];

fn main() {
    for table in EMBEDDED_TABLES {
        validate_taxonomy_file(Path::new(table));
    }
    set_build_dependencies();
}

fn validate_taxonomy_file(path: &Path) {
    // Ensure the snapshot exists at build time
    assert!(
        path.exists(),
        "\n\nTAXONOMY BUILD ERROR: File not found\n\
         Path: {}\n\
         Run the ingestion scripts to produce the processed tables before building.\n",
        path.display()
    );

    let mut reader = csv::Reader::from_path(path).unwrap_or_else(|e| {
        panic!(
            "\n\nTAXONOMY BUILD ERROR: Failed to open file\n\
             Path: {}\n\
             Error: {e}\n",
            path.display()
        );
    });

    let headers = reader
        .headers()
        .unwrap_or_else(|e| {
            panic!(
                "\n\nTAXONOMY BUILD ERROR: Invalid header row\n\
                 Path: {}\n\
                 Error: {e}\n",
                path.display()
            );
        })
        .clone();

    let sci_idx = headers
        .iter()
        .position(|h| h.trim() == "scientific_name")
        .unwrap_or_else(|| {
            panic!(
                "\n\nTAXONOMY BUILD ERROR: Missing 'scientific_name' column\n\
                 Path: {}\n\
                 Got: {headers:?}\n",
                path.display()
            );
        });

    let rows = validate_rows(&mut reader, sci_idx, path);

    println!(
        "cargo:warning=Validated taxonomy {}: {rows} records",
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unknown>")
    );
}

fn validate_rows(reader: &mut csv::Reader<std::fs::File>, sci_idx: usize, path: &Path) -> usize {
    let mut seen = HashSet::new();
    let mut rows = 0;

    for (i, record) in reader.records().enumerate() {
        // Header is line 1
        let line = i + 2;
        let record = record.unwrap_or_else(|e| {
            panic!(
                "\n\nTAXONOMY BUILD ERROR: Malformed row\n\
                 Path: {}, line {line}\n\
                 Error: {e}\n",
                path.display()
            );
        });

        let name = record.get(sci_idx).map(str::trim).unwrap_or_default();
        assert!(
            !name.is_empty(),
            "\n\nTAXONOMY BUILD ERROR: Empty scientific name\n\
             Path: {}, line {line}\n",
            path.display()
        );
        assert!(
            seen.insert(name.to_string()),
            "\n\nTAXONOMY BUILD ERROR: Duplicate scientific name '{name}'\n\
             Path: {}, line {line}\n\
             Scientific names must be unique within a table.\n",
            path.display()
        );
        rows += 1;
    }

    rows
}

fn set_build_dependencies() {
    // Tell cargo to rerun if any snapshot changes
    for table in EMBEDDED_TABLES {
        println!("cargo:rerun-if-changed={table}");
    }

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
