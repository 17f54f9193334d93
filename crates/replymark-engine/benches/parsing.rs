use criterion::{Criterion, black_box, criterion_group, criterion_main};
use replymark_engine::ResponseStream;
use replymark_engine::parsing::parse_text;

// Roughly the shape of a long model reply: prose, lists, and a table.
fn generate_transcript(sections: usize) -> String {
    let mut out = String::new();
    for i in 0..sections {
        out.push_str(&format!("## Section {i}\n\n"));
        out.push_str("Some prose with **emphasis** and more words to scan.\n\n");
        out.push_str("* first point\n* second point\n* third **point**\n\n");
        out.push_str("|key|value|\n|---|---|\n|alpha|1|\n|beta|2|\n\n");
        out.push_str("> a quoted remark\n\n---\n");
    }
    out
}

fn bench_full_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_parse");
    group.sample_size(50);

    let transcript = generate_transcript(50);
    group.bench_function("parse_text", |b| {
        b.iter(|| {
            let blocks = parse_text(black_box(&transcript));
            black_box(blocks);
        });
    });

    group.finish();
}

// The accumulator re-parses the whole buffer per chunk, so streaming cost is
// quadratic in reply size. This group keeps an eye on that trade-off.
fn bench_chunked_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunked_append");
    group.sample_size(20);

    let transcript = generate_transcript(10);
    group.bench_function("append_64b_chunks", |b| {
        b.iter(|| {
            let mut stream = ResponseStream::new();
            let bytes = transcript.as_bytes();
            for chunk in bytes.chunks(64) {
                // transcript is ASCII, so byte chunks are valid text
                stream.append(std::str::from_utf8(chunk).unwrap());
            }
            black_box(stream.blocks().len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_full_parse, bench_chunked_append);
criterion_main!(benches);
