//! Embedded service-name registry.
//!
//! Stands in for the IANA service-names registry and the open-port
//! frequency table the scanner consults when building [`Port`] values.
//! The refresh-from-network path lives outside the engine; this table is
//! the contract it fulfils.
//!
//! [`Port`]: crate::network::port::Port

use crate::network::port::Protocol;

/// A registry row: service name plus a one-line description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceEntry {
    pub name: &'static str,
    pub description: &'static str,
}

/// Well-known TCP assignments, ordered by port number.
static TCP_SERVICES: &[(u16, &str, &str)] = &[
    (7, "echo", "Echo"),
    (20, "ftp-data", "File Transfer [Default Data]"),
    (21, "ftp", "File Transfer Protocol [Control]"),
    (22, "ssh", "The Secure Shell (SSH) Protocol"),
    (23, "telnet", "Telnet"),
    (25, "smtp", "Simple Mail Transfer"),
    (26, "rsftp", "RSFTP"),
    (37, "time", "Time"),
    (53, "domain", "Domain Name Server"),
    (79, "finger", "Finger"),
    (80, "http", "World Wide Web HTTP"),
    (81, "hosts2-ns", "HOSTS2 Name Server"),
    (88, "kerberos", "Kerberos"),
    (106, "pop3pw", "3COM-TSMUX / poppassd"),
    (110, "pop3", "Post Office Protocol - Version 3"),
    (111, "sunrpc", "SUN Remote Procedure Call"),
    (113, "ident", "Authentication Service"),
    (119, "nntp", "Network News Transfer Protocol"),
    (135, "msrpc", "Microsoft RPC Endpoint Mapper"),
    (139, "netbios-ssn", "NETBIOS Session Service"),
    (143, "imap", "Internet Message Access Protocol"),
    (144, "news", "NewS window system"),
    (179, "bgp", "Border Gateway Protocol"),
    (199, "smux", "SNMP Unix Multiplexer"),
    (389, "ldap", "Lightweight Directory Access Protocol"),
    (427, "svrloc", "Server Location"),
    (443, "https", "HTTP over TLS/SSL"),
    (444, "snpp", "Simple Network Paging Protocol"),
    (445, "microsoft-ds", "Microsoft Directory Services"),
    (465, "submissions", "Message Submission over TLS"),
    (513, "login", "Remote Login via Telnet"),
    (514, "shell", "BSD rshd"),
    (515, "printer", "Line Printer Daemon"),
    (543, "klogin", "Kerberos Login"),
    (544, "kshell", "Kerberos Remote Shell"),
    (548, "afp", "AFP over TCP"),
    (554, "rtsp", "Real Time Streaming Protocol"),
    (587, "submission", "Message Submission"),
    (631, "ipp", "Internet Printing Protocol"),
    (646, "ldp", "Label Distribution Protocol"),
    (873, "rsync", "rsync file distribution"),
    (990, "ftps", "FTP over TLS/SSL"),
    (993, "imaps", "IMAP over TLS/SSL"),
    (995, "pop3s", "POP3 over TLS/SSL"),
    (1025, "nfs-or-iis", "NFS or IIS"),
    (1026, "lsa-or-nterm", "Windows RPC variants"),
    (1027, "iis", "Windows RPC variants"),
    (1433, "ms-sql-s", "Microsoft SQL Server"),
    (1720, "h323q931", "H.323 Call Signalling"),
    (1723, "pptp", "Point-to-Point Tunnelling Protocol"),
    (1755, "wms", "Windows Media Service"),
    (1900, "upnp", "Universal Plug and Play"),
    (2000, "cisco-sccp", "Cisco SCCP"),
    (2049, "nfs", "Network File System"),
    (2121, "ccproxy-ftp", "CCProxy FTP"),
    (3000, "ppp", "Development HTTP / node apps"),
    (3128, "squid-http", "Squid proxy"),
    (3306, "mysql", "MySQL database"),
    (3389, "ms-wbt-server", "Microsoft Remote Desktop"),
    (3986, "mapper-ws-ethd", "MAPPER workstation server"),
    (4899, "radmin", "Radmin remote administration"),
    (5000, "upnp", "Universal Plug and Play / dev HTTP"),
    (5009, "airport-admin", "Apple AirPort Admin"),
    (5051, "ida-agent", "Symantec Intruder Alert"),
    (5060, "sip", "Session Initiation Protocol"),
    (5101, "admdog", "Talarian TCP"),
    (5190, "aol", "America On-Line"),
    (5357, "wsdapi", "Web Services for Devices"),
    (5432, "postgresql", "PostgreSQL database"),
    (5631, "pcanywheredata", "pcAnywhere data"),
    (5666, "nrpe", "Nagios Remote Plugin Executor"),
    (5800, "vnc-http", "VNC over HTTP"),
    (5900, "vnc", "Virtual Network Computing display"),
    (6000, "x11", "X Window System"),
    (6001, "x11:1", "X Window System"),
    (6379, "redis", "Redis key-value store"),
    (6646, "unknown", "McAfee agent"),
    (7070, "realserver", "RealServer"),
    (8000, "http-alt", "Alternate HTTP"),
    (8008, "http", "IBM HTTP Server"),
    (8009, "ajp13", "Apache JServ Protocol 1.3"),
    (8080, "http-proxy", "Common HTTP proxy/second web server"),
    (8081, "blackice-icecap", "ICECap user console"),
    (8443, "https-alt", "Common alternate HTTPS"),
    (8888, "sun-answerbook", "Sun Answerbook / alternate HTTP"),
    (9090, "zeus-admin", "Zeus admin server"),
    (9100, "jetdirect", "HP JetDirect raw printing"),
    (9200, "wap-wsp", "Elasticsearch / WAP connectionless"),
    (9999, "abyss", "Abyss web server remote web management"),
    (10000, "snet-sensor-mgmt", "Webmin / SecureNet Pro sensor"),
    (27017, "mongod", "MongoDB database"),
    (32768, "filenet-tms", "Filenet TMS"),
    (49152, "unknown", "Dynamic/private range"),
    (49153, "unknown", "Dynamic/private range"),
    (49154, "unknown", "Dynamic/private range"),
];

/// Open-port frequency ranking, most commonly open first.
static MOST_COMMON_TCP: &[u16] = &[
    80, 23, 443, 21, 22, 25, 3389, 110, 445, 139, 143, 53, 135, 3306, 8080,
    1723, 111, 995, 993, 5900, 1025, 587, 8888, 199, 1720, 465, 548, 113, 81,
    6001, 10000, 514, 5060, 179, 1026, 2000, 8443, 8000, 32768, 554, 26, 1433,
    49152, 2001, 515, 8008, 49154, 1027, 5666, 646, 5000, 5631, 631, 49153,
    8081, 2049, 88, 79, 5800, 106, 2121, 1110, 49155, 6000, 513, 990, 5357,
    427, 49156, 543, 544, 5101, 144, 7, 389, 8009, 3128, 444, 9999, 5009,
    7070, 5190, 3000, 5432, 1900, 3986, 13, 1029, 9, 5051, 6646, 49157, 1028,
    873, 1755, 2717, 4899, 9100, 119, 37, 1000, 3001, 5001, 82, 10010, 1030,
    9090, 2107, 1024, 2103, 6004, 1801, 5050, 19, 8031, 1041, 255, 6379,
    9200, 27017,
];

/// Looks up the registered service for `(protocol, number)`.
///
/// UDP assignments are not carried; UDP scanning is out of scope and the
/// registry only answers for the protocols the engine probes.
pub fn lookup(protocol: Protocol, number: u16) -> Option<ServiceEntry> {
    match protocol {
        Protocol::Tcp => TCP_SERVICES
            .binary_search_by_key(&number, |&(n, _, _)| n)
            .ok()
            .map(|idx| {
                let (_, name, description) = TCP_SERVICES[idx];
                ServiceEntry { name, description }
            }),
        Protocol::Udp => None,
    }
}

/// Returns up to `count` port numbers, most frequently open first.
pub fn most_common_ports(count: usize) -> Vec<u16> {
    MOST_COMMON_TCP.iter().take(count).copied().collect()
}
