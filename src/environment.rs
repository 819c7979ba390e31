// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//log
pub const ENV_LLRT_LOG: &str = "LLRT_LOG";

//fast_now binary
pub const ENV_LLRT_FAST_NOW_ITERATIONS: &str = "LLRT_FAST_NOW_ITERATIONS";
pub const ENV_LLRT_FAST_NOW_OFFSET_SECS: &str = "LLRT_FAST_NOW_OFFSET_SECS";
