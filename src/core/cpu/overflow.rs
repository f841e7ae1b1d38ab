// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Signed 32-bit overflow predicates
//!
//! The single place in the core that classifies signed overflow. The
//! trapping arithmetic instructions (ADD, ADDI, SUB) compute their result
//! with wrapping arithmetic and then ask these predicates whether the
//! operation overflowed; nothing else in the crate makes that judgement.

/// True iff `a + b` overflowed, given the wrapped sum
///
/// Addition overflows exactly when both operands share a sign and the sum's
/// sign differs from it.
#[inline(always)]
pub(crate) fn add_overflows(a: i32, b: i32, sum: i32) -> bool {
    (a > 0 && b > 0 && sum < 0) || (a < 0 && b < 0 && sum > 0)
}

/// True iff `a - b` overflowed, given the wrapped difference
///
/// Subtraction overflows exactly when the operands have opposite signs and
/// the difference's sign differs from `a`.
#[inline(always)]
pub(crate) fn sub_overflows(a: i32, b: i32, diff: i32) -> bool {
    (a < 0 && b > 0 && diff > 0) || (a > 0 && b < 0 && diff < 0)
}
