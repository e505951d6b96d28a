// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::buffer::Allocator;
use crate::converter::core::{fixed_span, Converter};
use crate::converter::number::PrimitiveConverter;
use crate::error::Error;
use byteorder::{ByteOrder, LittleEndian};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};

fn ip_from_octets(octets: &[u8]) -> Result<IpAddr, Error> {
    match octets.len() {
        4 => {
            let mut v4 = [0u8; 4];
            v4.copy_from_slice(octets);
            Ok(IpAddr::from(v4))
        }
        16 => {
            let mut v6 = [0u8; 16];
            v6.copy_from_slice(octets);
            Ok(IpAddr::from(v6))
        }
        n => Err(Error::invalid_data(format!(
            "ip address must be 4 or 16 bytes, got {}",
            n
        ))),
    }
}

fn write_ip(allocator: &mut Allocator<'_>, ip: &IpAddr) -> Result<(), Error> {
    match ip {
        IpAddr::V4(v4) => allocator.append(&v4.octets()),
        IpAddr::V6(v6) => allocator.append(&v6.octets()),
    }
}

impl Converter<Ipv4Addr> for PrimitiveConverter<Ipv4Addr> {
    fn length(&self) -> usize {
        4
    }

    fn encode(&self, allocator: &mut Allocator<'_>, value: &Ipv4Addr) -> Result<(), Error> {
        allocator.append(&value.octets())
    }

    fn decode(&self, span: &[u8]) -> Result<Ipv4Addr, Error> {
        let span = fixed_span(span, 4)?;
        Ok(Ipv4Addr::new(span[0], span[1], span[2], span[3]))
    }
}

impl Converter<Ipv6Addr> for PrimitiveConverter<Ipv6Addr> {
    fn length(&self) -> usize {
        16
    }

    fn encode(&self, allocator: &mut Allocator<'_>, value: &Ipv6Addr) -> Result<(), Error> {
        allocator.append(&value.octets())
    }

    fn decode(&self, span: &[u8]) -> Result<Ipv6Addr, Error> {
        let mut octets = [0u8; 16];
        octets.copy_from_slice(fixed_span(span, 16)?);
        Ok(Ipv6Addr::from(octets))
    }
}

impl Converter<IpAddr> for PrimitiveConverter<IpAddr> {
    fn encode(&self, allocator: &mut Allocator<'_>, value: &IpAddr) -> Result<(), Error> {
        write_ip(allocator, value)
    }

    fn decode(&self, span: &[u8]) -> Result<IpAddr, Error> {
        ip_from_octets(span)
    }
}

const SOCKET_V4_LENGTH: usize = 4 + 2;
const SOCKET_V6_LENGTH: usize = 16 + 2 + 4 + 4;

/// Address octets followed by the port. IPv6 addresses also carry the flow
/// info and the scope id, so the address class follows from the body length.
impl Converter<SocketAddr> for PrimitiveConverter<SocketAddr> {
    fn encode(&self, allocator: &mut Allocator<'_>, value: &SocketAddr) -> Result<(), Error> {
        match value {
            SocketAddr::V4(v4) => {
                allocator.append(&v4.ip().octets())?;
                allocator.write_u16(v4.port())
            }
            SocketAddr::V6(v6) => {
                allocator.append(&v6.ip().octets())?;
                allocator.write_u16(v6.port())?;
                allocator.write_u32(v6.flowinfo())?;
                allocator.write_u32(v6.scope_id())
            }
        }
    }

    fn decode(&self, span: &[u8]) -> Result<SocketAddr, Error> {
        match span.len() {
            SOCKET_V4_LENGTH => {
                let ip = Ipv4Addr::new(span[0], span[1], span[2], span[3]);
                let port = LittleEndian::read_u16(&span[4..6]);
                Ok(SocketAddr::V4(SocketAddrV4::new(ip, port)))
            }
            SOCKET_V6_LENGTH => {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(&span[..16]);
                Ok(SocketAddr::V6(SocketAddrV6::new(
                    Ipv6Addr::from(octets),
                    LittleEndian::read_u16(&span[16..18]),
                    LittleEndian::read_u32(&span[18..22]),
                    LittleEndian::read_u32(&span[22..26]),
                )))
            }
            n => Err(Error::invalid_data(format!(
                "socket address must be {} or {} bytes, got {}",
                SOCKET_V4_LENGTH, SOCKET_V6_LENGTH, n
            ))),
        }
    }
}

describe_primitive!(Ipv4Addr, Ipv6Addr, IpAddr, SocketAddr);
