//! Benchmark: template parse and full-buffer decode over a realistic
//! multi-struct template (IPv4 header fields against a captured header).

use bitscope::{decode, template, BitBuffer};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const TEMPLATE: &str = "\
[IpHeader]
version     = 0:3 = 4
ihl         = 4:7 = 5
tos         = 8:15
length      = 16:31
ident       = 32:47
flag_df     = 49
flag_mf     = 50
frag_offset = 51:63
ttl         = 64:71
protocol    = 72:79
checksum    = 80:95
src         = 96:127
dst         = 128:159

[TcpFlags]
urg = 42
ack = 43
psh = 44
rst = 45
syn = 46
fin = 47
";

// 20-byte IPv4 header: 192.168.0.1 -> 192.168.0.199, TCP.
const HEADER_HEX: &str = "4500003C1C4640004006B1E6C0A80001C0A800C7";

fn bench_template_parse(c: &mut Criterion) {
    c.bench_function("template_parse", |b| {
        b.iter(|| template::parse(black_box(TEMPLATE)).expect("parse"))
    });
}

fn bench_decode(c: &mut Criterion) {
    let t = template::parse(TEMPLATE).expect("parse");
    let def = t.get("IpHeader").expect("struct");
    let buf = BitBuffer::from_hex(HEADER_HEX).expect("hex");
    c.bench_function("decode_ip_header", |b| {
        b.iter(|| decode(black_box(&buf), &def.fields).expect("decode"))
    });
}

fn bench_round_trip(c: &mut Criterion) {
    let buf = BitBuffer::from_hex(HEADER_HEX).expect("hex");
    c.bench_function("buffer_to_hex", |b| b.iter(|| black_box(&buf).to_hex()));
}

criterion_group!(benches, bench_template_parse, bench_decode, bench_round_trip);
criterion_main!(benches);
