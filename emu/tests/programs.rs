use emu::cpu::registers::Register;
use emu::{EmuError, I8086, Product, hex, signed_multiply, unsigned_multiply};
use pretty_assertions::assert_eq;
use rand::Rng;

/// `xor dx, dx; mov ax, x; imul dx:ax, ax, y`
fn multiply_program(x: u16, y: u16) -> Vec<u8> {
    let [x_lo, x_hi] = x.to_le_bytes();
    let [y_lo, y_hi] = y.to_le_bytes();
    vec![0x31, 0xD2, 0xB8, x_lo, x_hi, 0x69, 0xD0, y_lo, y_hi]
}

fn run(program: &[u8]) -> Result<Product, EmuError> {
    I8086::new().run(program)
}

#[test]
fn reference_token() {
    let program = hex::parse_program("31d2b8cced69d07856").unwrap();
    let mut cpu = I8086::new();
    let product = cpu.run(&program).unwrap();

    assert_eq!(product.high, 0xF9D9);
    assert_eq!(product.low, 0xFFA0);
}

#[test]
fn signed_products_match_native() {
    let mut rng = rand::thread_rng();

    for _ in 0..5_000 {
        let x: i16 = rng.gen_range(i16::MIN..=i16::MAX);
        let y: i16 = rng.gen_range(i16::MIN..=i16::MAX);

        let product = run(&multiply_program(x as u16, y as u16)).unwrap();
        assert_eq!(
            product.value(),
            (i32::from(x) * i32::from(y)) as u32,
            "{x} * {y}"
        );
    }
}

#[test]
fn non_negative_products_are_exact() {
    let mut rng = rand::thread_rng();

    for _ in 0..5_000 {
        let x: u16 = rng.gen_range(0..=0x7FFF);
        let y: u16 = rng.gen_range(0..=0x7FFF);

        let product = run(&multiply_program(x, y)).unwrap();
        assert_eq!(product.value(), u32::from(x) * u32::from(y));
    }
}

#[test]
fn program_and_direct_multiply_agree() {
    let mut rng = rand::thread_rng();

    for _ in 0..1_000 {
        let x: u16 = rng.gen_range(0..=u16::MAX);
        let y: u16 = rng.gen_range(0..=u16::MAX);

        assert_eq!(run(&multiply_program(x, y)).unwrap(), signed_multiply(x, y));
        assert_eq!(
            unsigned_multiply(x, y).value(),
            u32::from(x) * u32::from(y)
        );
    }
}

#[test]
fn signed_boundaries() {
    let cases: [(i16, i16); 6] = [
        (i16::MIN, i16::MIN),
        (i16::MIN, i16::MAX),
        (i16::MAX, i16::MAX),
        (i16::MIN, -1),
        (-1, -1),
        (i16::MIN, 1),
    ];

    for (x, y) in cases {
        let product = run(&multiply_program(x as u16, y as u16)).unwrap();
        assert_eq!(
            product.value(),
            (i32::from(x) * i32::from(y)) as u32,
            "{x} * {y}"
        );
    }
}

#[test]
fn multiply_by_zero_clears_both_halves() {
    assert_eq!(run(&multiply_program(0xEDCC, 0)).unwrap(), Product::default());
    assert_eq!(run(&multiply_program(0, 0x8765)).unwrap(), Product::default());
}

#[test]
fn packed_operands() {
    let (a, b) = hex::unpack_operands("34127856").unwrap();
    assert_eq!(unsigned_multiply(a, b).to_string(), "06260060");

    let (a, b) = hex::unpack_operands("cced7856").unwrap();
    assert_eq!(signed_multiply(a, b).to_string(), "f9d9ffa0");
}

#[test]
fn unsupported_opcode_stops_before_mutation() {
    let mut program = multiply_program(0x1234, 0x5678);
    program.insert(5, 0xFF);

    let mut cpu = I8086::new();
    assert_eq!(
        cpu.run(&program),
        Err(EmuError::UnsupportedOpcode {
            byte: 0xFF,
            offset: 5
        })
    );
    assert_eq!(cpu.registers.register_at(Register::AX), 0x1234);
    assert_eq!(cpu.registers.register_at(Register::DX), 0);
}

#[test]
fn registers_serialize() {
    let mut cpu = I8086::new();
    cpu.run(&multiply_program(0xEDCC, 0x5678)).unwrap();

    let json = serde_json::to_string(&cpu.registers).unwrap();
    assert_eq!(json, "[65440,0,63961,0,0,0,0,0]");
}
