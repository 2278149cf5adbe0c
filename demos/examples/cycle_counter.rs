//! Cycle Counter: running without the CLI
//!
//! The shape an embedded target would use: build a `Benchmarker` by hand,
//! run it, and send results anywhere through a `Reporter`. Here the hardware
//! cycle counter is the clock and results go through `FmtReporter` into a
//! `String` (think UART) and through a plain closure.
//!
//! Run with: cargo run --example cycle_counter -p embench-demos --release

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
fn main() -> anyhow::Result<()> {
    use embench::{Benchmarker, CycleClock, FmtReporter, State, benchmark, do_not_optimize};

    fn xor_shift(state: &mut State<CycleClock, f64>) {
        let mut x = 0x2545_f491_4f6c_dd1du64;
        state.iter(|| {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        });
    }

    fn crc_byte(state: &mut State<CycleClock, f64>) {
        while let Some(_t) = state.next_iteration() {
            let mut crc = 0xffu8 ^ 0x5a;
            for _ in 0..8 {
                crc = if crc & 0x80 != 0 { (crc << 1) ^ 0x07 } else { crc << 1 };
            }
            do_not_optimize(&crc);
        }
    }

    let mut b = Benchmarker::<CycleClock, f64>::with_default_iterations(10_000);
    benchmark!(b, xor_shift);
    benchmark!(b, crc_byte, 1_000);

    let mut uart = FmtReporter::with_unit(String::new(), "cyc");
    b.run_benchmarks(&mut uart);
    let text = uart
        .finish()
        .map_err(|_| anyhow::anyhow!("failed to format results"))?;
    print!("{}", text);

    // Any FnMut with the reporter signature works too
    let mut slowest: Option<(String, f64)> = None;
    b.run_benchmarks(&mut |name: &str, _n: u64, mean: Option<f64>, _sd: Option<f64>| {
        if let Some(mean) = mean {
            if slowest.as_ref().map_or(true, |(_, m)| mean > *m) {
                slowest = Some((name.to_string(), mean));
            }
        }
    });
    if let Some((name, mean)) = slowest {
        println!("slowest: {} ({:.1} cycles)", name, mean);
    }

    Ok(())
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn main() {
    eprintln!("No cycle counter on this architecture");
}
