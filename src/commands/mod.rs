// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod calc;
pub mod chat;
pub mod doctor;
pub mod exporter;
pub mod funds;
pub mod glossary;
pub mod settings;
pub mod users;
