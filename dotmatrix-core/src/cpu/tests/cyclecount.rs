use crate::cpu::instructions::{
    Instruction as I, JumpCondition, ModifyTarget, ReadTarget, WriteTarget,
};
use crate::cpu::registers::{CpuRegister, CpuRegisterPair};
use crate::cpu::CpuRegisters;

#[test]
fn validate_m_cycles_required() {
    let cr = CpuRegisters::new();

    let reg = |r| ReadTarget::Register(r);
    let wreg = |r| WriteTarget::Register(r);
    let mreg = |r| ModifyTarget::Register(r);

    // 8-bit load instructions
    assert_eq!(1, I::Load(wreg(CpuRegister::A), reg(CpuRegister::B)).m_cycles_required(&cr));
    assert_eq!(2, I::Load(wreg(CpuRegister::A), ReadTarget::Immediate(0)).m_cycles_required(&cr));
    assert_eq!(2, I::Load(wreg(CpuRegister::A), ReadTarget::IndirectHL).m_cycles_required(&cr));
    assert_eq!(2, I::Load(WriteTarget::IndirectHL, reg(CpuRegister::A)).m_cycles_required(&cr));
    assert_eq!(
        3,
        I::Load(WriteTarget::IndirectHL, ReadTarget::Immediate(0)).m_cycles_required(&cr)
    );
    assert_eq!(
        2,
        I::Load(WriteTarget::Accumulator, ReadTarget::IndirectBC).m_cycles_required(&cr)
    );
    assert_eq!(
        2,
        I::Load(WriteTarget::IndirectDE, ReadTarget::Accumulator).m_cycles_required(&cr)
    );
    assert_eq!(
        4,
        I::Load(WriteTarget::Accumulator, ReadTarget::Direct(0)).m_cycles_required(&cr)
    );
    assert_eq!(
        4,
        I::Load(WriteTarget::Direct(0), ReadTarget::Accumulator).m_cycles_required(&cr)
    );
    assert_eq!(
        2,
        I::Load(WriteTarget::Accumulator, ReadTarget::FFIndirectC).m_cycles_required(&cr)
    );
    assert_eq!(
        3,
        I::Load(WriteTarget::Accumulator, ReadTarget::FFDirect(0)).m_cycles_required(&cr)
    );
    assert_eq!(
        3,
        I::Load(WriteTarget::FFDirect(0), ReadTarget::Accumulator).m_cycles_required(&cr)
    );
    assert_eq!(
        2,
        I::Load(WriteTarget::Accumulator, ReadTarget::IndirectHLInc).m_cycles_required(&cr)
    );
    assert_eq!(
        2,
        I::Load(WriteTarget::IndirectHLDec, ReadTarget::Accumulator).m_cycles_required(&cr)
    );

    // 16-bit load instructions
    assert_eq!(
        3,
        I::LoadRegisterPairImmediate(CpuRegisterPair::BC, 0).m_cycles_required(&cr)
    );
    assert_eq!(5, I::LoadDirectStackPointer(0).m_cycles_required(&cr));
    assert_eq!(2, I::LoadStackPointerHL.m_cycles_required(&cr));
    assert_eq!(4, I::PushStack(CpuRegisterPair::BC).m_cycles_required(&cr));
    assert_eq!(3, I::PopStack(CpuRegisterPair::BC).m_cycles_required(&cr));
    assert_eq!(3, I::LoadHLStackPointerOffset(0).m_cycles_required(&cr));

    // 8-bit arithmetic/logical instructions
    assert_eq!(1, I::Add(reg(CpuRegister::B)).m_cycles_required(&cr));
    assert_eq!(2, I::Add(ReadTarget::IndirectHL).m_cycles_required(&cr));
    assert_eq!(2, I::Add(ReadTarget::Immediate(0)).m_cycles_required(&cr));
    assert_eq!(1, I::AddWithCarry(reg(CpuRegister::B)).m_cycles_required(&cr));
    assert_eq!(1, I::Subtract(reg(CpuRegister::B)).m_cycles_required(&cr));
    assert_eq!(2, I::SubtractWithCarry(ReadTarget::Immediate(0)).m_cycles_required(&cr));
    assert_eq!(1, I::Compare(reg(CpuRegister::B)).m_cycles_required(&cr));
    assert_eq!(2, I::Compare(ReadTarget::IndirectHL).m_cycles_required(&cr));
    assert_eq!(1, I::Increment(mreg(CpuRegister::B)).m_cycles_required(&cr));
    assert_eq!(3, I::Increment(ModifyTarget::IndirectHL).m_cycles_required(&cr));
    assert_eq!(1, I::Decrement(mreg(CpuRegister::B)).m_cycles_required(&cr));
    assert_eq!(3, I::Decrement(ModifyTarget::IndirectHL).m_cycles_required(&cr));
    assert_eq!(1, I::And(reg(CpuRegister::B)).m_cycles_required(&cr));
    assert_eq!(1, I::Or(reg(CpuRegister::B)).m_cycles_required(&cr));
    assert_eq!(1, I::Xor(reg(CpuRegister::B)).m_cycles_required(&cr));
    assert_eq!(1, I::ComplementCarryFlag.m_cycles_required(&cr));
    assert_eq!(1, I::SetCarryFlag.m_cycles_required(&cr));
    assert_eq!(1, I::DecimalAdjustAccumulator.m_cycles_required(&cr));
    assert_eq!(1, I::ComplementAccumulator.m_cycles_required(&cr));

    // 16-bit arithmetic instructions
    assert_eq!(2, I::AddHLRegister(CpuRegisterPair::BC).m_cycles_required(&cr));
    assert_eq!(2, I::IncRegisterPair(CpuRegisterPair::BC).m_cycles_required(&cr));
    assert_eq!(2, I::DecRegisterPair(CpuRegisterPair::BC).m_cycles_required(&cr));
    assert_eq!(4, I::AddSPImmediate(0).m_cycles_required(&cr));

    // Bit rotate/shift instructions
    assert_eq!(1, I::RotateLeft(ModifyTarget::Accumulator).m_cycles_required(&cr));
    assert_eq!(1, I::RotateLeftThruCarry(ModifyTarget::Accumulator).m_cycles_required(&cr));
    assert_eq!(1, I::RotateRight(ModifyTarget::Accumulator).m_cycles_required(&cr));
    assert_eq!(1, I::RotateRightThruCarry(ModifyTarget::Accumulator).m_cycles_required(&cr));
    assert_eq!(2, I::RotateLeft(mreg(CpuRegister::B)).m_cycles_required(&cr));
    assert_eq!(4, I::RotateLeft(ModifyTarget::IndirectHL).m_cycles_required(&cr));
    assert_eq!(2, I::RotateRightThruCarry(mreg(CpuRegister::B)).m_cycles_required(&cr));
    assert_eq!(4, I::RotateRightThruCarry(ModifyTarget::IndirectHL).m_cycles_required(&cr));
    assert_eq!(2, I::ShiftLeft(mreg(CpuRegister::B)).m_cycles_required(&cr));
    assert_eq!(4, I::ShiftLeft(ModifyTarget::IndirectHL).m_cycles_required(&cr));
    assert_eq!(2, I::ArithmeticShiftRight(mreg(CpuRegister::B)).m_cycles_required(&cr));
    assert_eq!(2, I::LogicalShiftRight(mreg(CpuRegister::B)).m_cycles_required(&cr));
    assert_eq!(2, I::Swap(mreg(CpuRegister::B)).m_cycles_required(&cr));
    assert_eq!(4, I::Swap(ModifyTarget::IndirectHL).m_cycles_required(&cr));

    // Single bit instructions
    assert_eq!(2, I::TestBit(0, reg(CpuRegister::B)).m_cycles_required(&cr));
    assert_eq!(3, I::TestBit(0, ReadTarget::IndirectHL).m_cycles_required(&cr));
    assert_eq!(2, I::SetBit(0, mreg(CpuRegister::B)).m_cycles_required(&cr));
    assert_eq!(4, I::SetBit(0, ModifyTarget::IndirectHL).m_cycles_required(&cr));
    assert_eq!(2, I::ResetBit(0, mreg(CpuRegister::B)).m_cycles_required(&cr));
    assert_eq!(4, I::ResetBit(0, ModifyTarget::IndirectHL).m_cycles_required(&cr));

    // Unconditional control flow instructions
    assert_eq!(4, I::Jump(0).m_cycles_required(&cr));
    assert_eq!(1, I::JumpHL.m_cycles_required(&cr));
    assert_eq!(3, I::RelativeJump(0).m_cycles_required(&cr));
    assert_eq!(6, I::Call(0).m_cycles_required(&cr));
    assert_eq!(4, I::Return.m_cycles_required(&cr));
    assert_eq!(4, I::ReturnFromInterruptHandler.m_cycles_required(&cr));
    assert_eq!(4, I::RestartCall(0).m_cycles_required(&cr));
    assert_eq!(1, I::DisableInterrupts.m_cycles_required(&cr));
    assert_eq!(1, I::EnableInterrupts.m_cycles_required(&cr));
    assert_eq!(1, I::NoOp.m_cycles_required(&cr));
    assert_eq!(1, I::Halt.m_cycles_required(&cr));
    assert_eq!(1, I::Stop.m_cycles_required(&cr));
}

#[test]
fn validate_conditional_m_cycles() {
    let all_flags_clear = CpuRegisters {
        flags: 0x00,
        ..CpuRegisters::new()
    };

    // Power-on flags have Z and C set
    let z_and_c_set = CpuRegisters::new();

    assert_eq!(3, I::JumpCond(JumpCondition::Z, 0).m_cycles_required(&all_flags_clear));
    assert_eq!(4, I::JumpCond(JumpCondition::Z, 0).m_cycles_required(&z_and_c_set));
    assert_eq!(4, I::JumpCond(JumpCondition::NZ, 0).m_cycles_required(&all_flags_clear));

    assert_eq!(
        2,
        I::RelativeJumpCond(JumpCondition::C, 0).m_cycles_required(&all_flags_clear)
    );
    assert_eq!(
        3,
        I::RelativeJumpCond(JumpCondition::C, 0).m_cycles_required(&z_and_c_set)
    );

    assert_eq!(3, I::CallCond(JumpCondition::Z, 0).m_cycles_required(&all_flags_clear));
    assert_eq!(6, I::CallCond(JumpCondition::Z, 0).m_cycles_required(&z_and_c_set));

    assert_eq!(2, I::ReturnCond(JumpCondition::NC).m_cycles_required(&z_and_c_set));
    assert_eq!(5, I::ReturnCond(JumpCondition::NC).m_cycles_required(&all_flags_clear));
}
