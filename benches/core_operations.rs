use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use vtsum::{PackageRef, classify, extract_checksum};

const SHA: &str = "0c5a140665436ec3dbfbb79e2dfb6d192655f26ef4a29aeffcb6d1820d716d83";

fn formula() -> String {
    let mut content = format!(
        "class PythonAT39 < Formula\n  \
         desc \"Interpreted, interactive, object-oriented programming language\"\n  \
         url \"https://www.python.org/ftp/python/3.9.5/Python-3.9.5.tar.xz\"\n  \
         sha256 \"{SHA}\"\n\n  \
         bottle do\n"
    );
    for tag in ["arm64_sonoma", "arm64_ventura", "sonoma", "ventura", "x86_64_linux"] {
        content.push_str(&format!("    sha256 {tag}: \"{SHA}\"\n"));
    }
    content.push_str("  end\n");
    // Formulae carry long install/test blocks after the checksum
    for i in 0..200 {
        content.push_str(&format!("  # line {i} of the install block\n"));
    }
    content.push_str("end\n");
    content
}

fn multilang_cask() -> String {
    let mut content = String::from("cask \"firefox\" do\n");
    for lang in ["af", "ar", "be", "bg", "cs", "da", "de", "el", "en-GB", "es"] {
        content.push_str(&format!(
            "  language \"{lang}\" do\n    sha256 \"{SHA}\"\n    \"{lang}\"\n  end\n"
        ));
    }
    content.push_str(&format!(
        "  language \"en\", default: true do\n    sha256 \"{SHA}\"\n    \"en-US\"\n  end\nend\n"
    ));
    content
}

fn arch_cask() -> String {
    format!(
        "cask \"docker\" do\n  arch arm: \"arm64\", intel: \"amd64\"\n\n  \
         sha256 arm:   \"{SHA}\",\n         intel: \"{SHA}\"\nend\n"
    )
}

fn bench_classify(c: &mut Criterion) {
    let formula = formula();
    let cask = multilang_cask();

    c.bench_function("classify formula", |b| {
        b.iter(|| classify(black_box(&formula)))
    });
    c.bench_function("classify cask", |b| b.iter(|| classify(black_box(&cask))));
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_checksum");

    let fixtures = [
        ("formula", formula()),
        ("multilang_cask", multilang_cask()),
        ("arch_cask", arch_cask()),
    ];

    for (i, (name, content)) in fixtures.iter().enumerate() {
        group.bench_with_input(BenchmarkId::new(*name, i), content, |b, content| {
            b.iter(|| extract_checksum(black_box(content)))
        });
    }

    group.finish();
}

fn bench_parse_package_ref(c: &mut Criterion) {
    c.bench_function("parse package ref", |b| {
        b.iter(|| {
            let _ = PackageRef::parse(black_box("python@3.9"));
            let _ = PackageRef::parse(black_box("clintmod/formulas/macprefs"));
            let _ = PackageRef::parse(black_box("not/valid"));
        })
    });
}

criterion_group!(
    benches,
    bench_classify,
    bench_extract,
    bench_parse_package_ref
);
criterion_main!(benches);
