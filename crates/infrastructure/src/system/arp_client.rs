use arpdns_application::ports::{ArpClient, InterfaceBinding};
use arpdns_domain::{MacAddress, ResolutionError};
use async_trait::async_trait;
use pnet::datalink::{self, Channel, DataLinkReceiver, DataLinkSender, NetworkInterface};
use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, ArpPacket, MutableArpPacket};
use pnet::packet::ethernet::{EtherTypes, EthernetPacket, MutableEthernetPacket};
use pnet::packet::Packet;
use pnet::util::MacAddr;
use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::time::{Duration, Instant};
use tracing::{debug, info};

const ETHERNET_HEADER_LEN: usize = 14;
const ARP_PACKET_LEN: usize = 28;
const FRAME_LEN: usize = ETHERNET_HEADER_LEN + ARP_PACKET_LEN;

/// How long a single receive blocks before the deadline is re-checked.
const READ_POLL: Duration = Duration::from_millis(50);

type EthernetChannel = (Box<dyn DataLinkSender>, Box<dyn DataLinkReceiver>);

/// ARP over a raw Ethernet channel on one interface.
///
/// Every exchange opens its own channel on the blocking pool, so concurrent
/// queries never read each other's replies and the client itself is stateless.
pub struct PnetArpClient {
    interface: NetworkInterface,
    binding: InterfaceBinding,
}

impl PnetArpClient {
    /// Binds to `interface_name`. Fails with `TransportUnavailable` when the
    /// interface is missing, has no MAC or IPv4 address, or a raw channel
    /// cannot be opened (usually missing CAP_NET_RAW).
    pub fn bind(interface_name: &str) -> Result<Self, ResolutionError> {
        let interface = datalink::interfaces()
            .into_iter()
            .find(|iface| iface.name == interface_name)
            .ok_or_else(|| {
                ResolutionError::TransportUnavailable(format!(
                    "interface {} not found",
                    interface_name
                ))
            })?;

        let mac = interface
            .mac
            .filter(|mac| *mac != MacAddr::zero())
            .ok_or_else(|| {
                ResolutionError::TransportUnavailable(format!(
                    "interface {} has no hardware address",
                    interface_name
                ))
            })?;

        let ipv4 = interface
            .ips
            .iter()
            .find_map(|network| match network.ip() {
                IpAddr::V4(ipv4) => Some(ipv4),
                IpAddr::V6(_) => None,
            })
            .ok_or_else(|| {
                ResolutionError::TransportUnavailable(format!(
                    "interface {} has no IPv4 address",
                    interface_name
                ))
            })?;

        open_channel(&interface).map_err(|e| {
            ResolutionError::TransportUnavailable(format!(
                "cannot open ARP channel on {}: {}",
                interface_name, e
            ))
        })?;

        let binding = InterfaceBinding {
            ipv4,
            mac: from_pnet(mac),
        };
        info!(
            interface = %interface_name,
            ip = %binding.ipv4,
            mac = %binding.mac,
            "ARP transport bound"
        );

        Ok(Self { interface, binding })
    }
}

#[async_trait]
impl ArpClient for PnetArpClient {
    async fn resolve(
        &self,
        target: Ipv4Addr,
        deadline: Duration,
    ) -> Result<MacAddress, ResolutionError> {
        let interface = self.interface.clone();
        let binding = self.binding;
        let expires_at = Instant::now() + deadline;

        let exchange =
            tokio::task::spawn_blocking(move || exchange(&interface, binding, target, expires_at));

        match tokio::time::timeout(deadline + READ_POLL, exchange).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(ResolutionError::NoReply(format!(
                "{}: ARP worker failed: {}",
                target, e
            ))),
            Err(_) => Err(ResolutionError::NoReply(format!("{}: timed out", target))),
        }
    }

    fn binding(&self) -> Option<InterfaceBinding> {
        Some(self.binding)
    }
}

fn open_channel(interface: &NetworkInterface) -> io::Result<EthernetChannel> {
    let config = datalink::Config {
        read_timeout: Some(READ_POLL),
        write_timeout: Some(READ_POLL),
        ..Default::default()
    };

    match datalink::channel(interface, config)? {
        Channel::Ethernet(tx, rx) => Ok((tx, rx)),
        _ => Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "unhandled datalink channel type",
        )),
    }
}

fn exchange(
    interface: &NetworkInterface,
    binding: InterfaceBinding,
    target: Ipv4Addr,
    expires_at: Instant,
) -> Result<MacAddress, ResolutionError> {
    let no_reply = |reason: String| ResolutionError::NoReply(format!("{}: {}", target, reason));

    let (mut tx, mut rx) = open_channel(interface).map_err(|e| no_reply(e.to_string()))?;

    let request =
        build_request(binding, target).ok_or_else(|| no_reply("cannot build request".to_string()))?;
    tx.send_to(&request, None)
        .ok_or_else(|| no_reply("send not supported".to_string()))?
        .map_err(|e| no_reply(e.to_string()))?;
    debug!(ip = %target, "ARP who-has sent");

    while Instant::now() < expires_at {
        match rx.next() {
            Ok(frame) => {
                if let Some(mac) = parse_reply(frame, target) {
                    return Ok(mac);
                }
            }
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(no_reply(e.to_string())),
        }
    }

    Err(no_reply("timed out".to_string()))
}

/// Broadcast Ethernet frame carrying an ARP who-has for `target`.
pub(crate) fn build_request(
    binding: InterfaceBinding,
    target: Ipv4Addr,
) -> Option<[u8; FRAME_LEN]> {
    let source_mac = to_pnet(binding.mac);

    let mut arp_buffer = [0u8; ARP_PACKET_LEN];
    {
        let mut arp = MutableArpPacket::new(&mut arp_buffer[..])?;
        arp.set_hardware_type(ArpHardwareTypes::Ethernet);
        arp.set_protocol_type(EtherTypes::Ipv4);
        arp.set_hw_addr_len(6);
        arp.set_proto_addr_len(4);
        arp.set_operation(ArpOperations::Request);
        arp.set_sender_hw_addr(source_mac);
        arp.set_sender_proto_addr(binding.ipv4);
        arp.set_target_hw_addr(MacAddr::zero());
        arp.set_target_proto_addr(target);
    }

    let mut frame = [0u8; FRAME_LEN];
    {
        let mut ethernet = MutableEthernetPacket::new(&mut frame[..])?;
        ethernet.set_destination(MacAddr::broadcast());
        ethernet.set_source(source_mac);
        ethernet.set_ethertype(EtherTypes::Arp);
        ethernet.set_payload(&arp_buffer);
    }
    Some(frame)
}

/// Sender hardware address of an ARP reply about `target`, if `frame` is one.
pub(crate) fn parse_reply(frame: &[u8], target: Ipv4Addr) -> Option<MacAddress> {
    let ethernet = EthernetPacket::new(frame)?;
    if ethernet.get_ethertype() != EtherTypes::Arp {
        return None;
    }

    let arp = ArpPacket::new(ethernet.payload())?;
    if arp.get_operation() != ArpOperations::Reply || arp.get_sender_proto_addr() != target {
        return None;
    }

    Some(from_pnet(arp.get_sender_hw_addr()))
}

fn from_pnet(mac: MacAddr) -> MacAddress {
    let MacAddr(a, b, c, d, e, f) = mac;
    MacAddress::new([a, b, c, d, e, f])
}

fn to_pnet(mac: MacAddress) -> MacAddr {
    let [a, b, c, d, e, f] = mac.octets();
    MacAddr(a, b, c, d, e, f)
}
